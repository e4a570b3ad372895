use anyhow::Result;
use invdash_core::*;
use std::path::PathBuf;
use tracing::info;

/// Loaded dashboard configuration for one command invocation
///
/// Tables are read on demand and never cached between views.
#[derive(Debug)]
pub struct AppState {
    pub config: DashboardConfig,
    /// Path the configuration was read from
    pub config_file: PathBuf,
}

impl AppState {
    /// Load and validate a configuration file
    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let config = load_config(&path)?;
        info!(path = %path.display(), title = %config.title, "dashboard ready");

        Ok(Self {
            config,
            config_file: path,
        })
    }

    /// Read the inventory table with its facet columns checked
    pub fn load_inventory(&self) -> Result<Table> {
        let source = self.config.inventory_source()?;
        Ok(load_table(&source)?)
    }

    /// Read a network's edges into a graph
    pub fn load_network(&self, view: &NetworkView) -> Result<RelationshipGraph> {
        let source = self.config.edges_source(view);
        let table = load_table(&source)?;
        Ok(RelationshipGraph::from_table(
            &table,
            &self.config.network_columns,
            &source.path,
        )?)
    }

    /// Read a network's interpretation table, if one is configured
    pub fn load_interpretation(&self, view: &NetworkView) -> Option<Result<Table>> {
        self.config
            .interpretation_source(view)
            .map(|source| load_table(&source).map_err(Into::into))
    }

    /// Gallery images with paths resolved against the configuration directory
    pub fn gallery_images(&self, gallery: &GalleryConfig) -> Vec<GalleryImage> {
        gallery_files(gallery)
            .into_iter()
            .map(|image| GalleryImage {
                path: self.config.resolve(&image.path),
                ..image
            })
            .collect()
    }

    /// Window-style title with the configuration file name
    pub fn get_title(&self) -> String {
        let file_name = self
            .config_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("dashboard");

        format!("{} - {}", self.config.title, file_name)
    }
}
