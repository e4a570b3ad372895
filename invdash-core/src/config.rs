use crate::error::{DashboardError, Result};
use crate::io::{read_text, Delimiter, TableSource};
use crate::models::FacetSpec;
use crate::schema_validation::validate_against_schema;
use crate::validation::validate_config;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Complete dashboard configuration, usually read from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: String,
    #[serde(default)]
    pub footer: Option<String>,
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub networks: Vec<NetworkView>,
    #[serde(default)]
    pub network_columns: NetworkColumns,
    #[serde(default)]
    pub node_categories: Vec<NodeCategory>,
    #[serde(default = "default_node_color")]
    pub default_color: String,
    #[serde(default)]
    pub galleries: Vec<GalleryConfig>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub path: PathBuf,
    #[serde(default = "default_inventory_delimiter")]
    pub delimiter: String,
    pub facets: Vec<FacetSpec>,
    /// Column shown as each card's heading
    #[serde(default)]
    pub title_column: Option<String>,
    /// Columns listed on each card, in order
    #[serde(default)]
    pub card_columns: Vec<String>,
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

/// A relationship network with an optional interpretation table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkView {
    pub name: String,
    pub edges: PathBuf,
    #[serde(default)]
    pub interpretation: Option<PathBuf>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Column names of an edge table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkColumns {
    pub source: String,
    pub target: String,
    pub weight: String,
    pub label: String,
    /// Alternative header names accepted for the weight column
    pub weight_aliases: Vec<String>,
}

impl Default for NetworkColumns {
    fn default() -> Self {
        Self {
            source: "Origen".to_string(),
            target: "Destino".to_string(),
            weight: "Peso".to_string(),
            label: "Tipo de Interacción".to_string(),
            weight_aliases: vec!["Periodicidad de la Interacción".to_string()],
        }
    }
}

/// Nodes whose name contains any of `contains` get `color`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeCategory {
    pub contains: Vec<String>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub name: String,
    pub dir: PathBuf,
    /// File name prefix; images are `{stem}{n}.{extension}` for n in 1..=count
    pub stem: String,
    pub count: usize,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_node_color() -> String {
    "gray".to_string()
}

fn default_inventory_delimiter() -> String {
    ";".to_string()
}

fn default_empty_message() -> String {
    "No inventory matches the selected filters.".to_string()
}

fn default_extension() -> String {
    "jpg".to_string()
}

fn default_page_size() -> usize {
    3
}

impl DashboardConfig {
    /// Resolve a configured path against the config file's directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Source description for the inventory table
    pub fn inventory_source(&self) -> Result<TableSource> {
        let delimiter = Delimiter::parse(&self.inventory.delimiter).ok_or_else(|| {
            DashboardError::InvalidConfig(vec![format!(
                "inventory delimiter '{}' must be a single character or 'auto'",
                self.inventory.delimiter
            )])
        })?;

        Ok(
            TableSource::new(self.resolve(&self.inventory.path), delimiter)
                .with_facet_columns(self.inventory.facets.iter().map(|f| f.column.clone())),
        )
    }

    pub fn network(&self, name: &str) -> Result<&NetworkView> {
        self.networks
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| DashboardError::UnknownView(name.to_string()))
    }

    pub fn gallery(&self, name: &str) -> Result<&GalleryConfig> {
        self.galleries
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| DashboardError::UnknownView(name.to_string()))
    }

    /// Source description for a network's edge table
    pub fn edges_source(&self, view: &NetworkView) -> TableSource {
        TableSource::new(self.resolve(&view.edges), Delimiter::Auto).skip_bad_rows(true)
    }

    /// Source description for a network's interpretation table, if any
    pub fn interpretation_source(&self, view: &NetworkView) -> Option<TableSource> {
        view.interpretation.as_ref().map(|path| {
            TableSource::new(self.resolve(path), Delimiter::Fixed(b';')).drop_repeated_header(true)
        })
    }
}

/// JSON Schema for the configuration file
pub fn config_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["title", "inventory"],
        "properties": {
            "title": {"type": "string"},
            "footer": {"type": "string"},
            "inventory": {
                "type": "object",
                "required": ["path", "facets"],
                "properties": {
                    "path": {"type": "string"},
                    "delimiter": {"type": "string"},
                    "facets": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["column", "kind"],
                            "properties": {
                                "column": {"type": "string"},
                                "kind": {"enum": ["exact", "multi_value"]}
                            }
                        }
                    },
                    "title_column": {"type": "string"},
                    "card_columns": {"type": "array", "items": {"type": "string"}},
                    "empty_message": {"type": "string"}
                }
            },
            "networks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "edges"],
                    "properties": {
                        "name": {"type": "string"},
                        "edges": {"type": "string"},
                        "interpretation": {"type": "string"},
                        "title": {"type": "string"}
                    }
                }
            },
            "network_columns": {
                "type": "object",
                "properties": {
                    "source": {"type": "string"},
                    "target": {"type": "string"},
                    "weight": {"type": "string"},
                    "label": {"type": "string"},
                    "weight_aliases": {"type": "array", "items": {"type": "string"}}
                }
            },
            "node_categories": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["contains", "color"],
                    "properties": {
                        "contains": {"type": "array", "items": {"type": "string"}},
                        "color": {"type": "string"}
                    }
                }
            },
            "default_color": {"type": "string"},
            "galleries": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "dir", "stem", "count"],
                    "properties": {
                        "name": {"type": "string"},
                        "dir": {"type": "string"},
                        "stem": {"type": "string"},
                        "count": {"type": "integer", "minimum": 0},
                        "extension": {"type": "string"},
                        "page_size": {"type": "integer", "minimum": 0}
                    }
                }
            }
        }
    })
}

/// Build a configuration from parsed JSON, validating shape and content
pub fn config_from_value(value: Value, base_dir: &Path) -> Result<DashboardConfig> {
    validate_against_schema(&config_schema(), &value).map_err(DashboardError::InvalidConfig)?;

    let mut config: DashboardConfig = serde_json::from_value(value)
        .map_err(|e| DashboardError::InvalidConfig(vec![e.to_string()]))?;
    config.base_dir = base_dir.to_path_buf();

    validate_config(&config).map_err(DashboardError::InvalidConfig)?;
    Ok(config)
}

/// Load and validate a configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig> {
    let path = path.as_ref();
    let contents = read_text(path)?;
    let value: Value =
        serde_json::from_str(&contents).map_err(|e| DashboardError::unreadable(path, e))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = config_from_value(value, base_dir)?;

    debug!(
        path = %path.display(),
        facets = config.inventory.facets.len(),
        networks = config.networks.len(),
        galleries = config.galleries.len(),
        "loaded dashboard config"
    );
    Ok(config)
}
