//! Directed relationship graph built from an edge table.
//!
//! Layout and drawing belong to external tools: [`RelationshipGraph::to_dot`]
//! feeds Graphviz for static plots and [`RelationshipGraph::to_vis_json`]
//! feeds vis-network for the interactive view.

use crate::config::{NetworkColumns, NodeCategory};
use crate::error::{DashboardError, Result};
use crate::models::Table;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Width used when wrapping node labels
pub const LABEL_WIDTH: usize = 20;

/// Node size per unit of weighted degree in static plots
const DOT_SIZE_PER_DEGREE: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    nodes: Vec<String>,
    edges: Vec<Edge>,
    edge_index: HashMap<(String, String), usize>,
}

impl RelationshipGraph {
    /// Build the graph from an edge table, one edge per row
    pub fn from_table(table: &Table, columns: &NetworkColumns, path: &Path) -> Result<Self> {
        let require = |column: &str| -> Result<()> {
            if table.has_column(column) {
                Ok(())
            } else {
                Err(DashboardError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                })
            }
        };
        require(&columns.source)?;
        require(&columns.target)?;

        let weight_column = std::iter::once(&columns.weight)
            .chain(columns.weight_aliases.iter())
            .find(|c| table.has_column(c))
            .cloned();
        if weight_column.is_none() {
            warn!(path = %path.display(), column = %columns.weight, "no weight column, using 1.0");
        }

        let mut graph = RelationshipGraph::default();
        for record in table {
            let source = record.get_or_empty(&columns.source).trim();
            let target = record.get_or_empty(&columns.target).trim();
            if source.is_empty() || target.is_empty() {
                warn!(row = record.row, "edge row without both endpoints, skipping");
                continue;
            }

            let weight = match &weight_column {
                Some(column) => parse_weight(record.get_or_empty(column)).unwrap_or_else(|| {
                    warn!(
                        row = record.row,
                        value = %record.get_or_empty(column),
                        "unparseable edge weight, using 1.0"
                    );
                    1.0
                }),
                None => 1.0,
            };

            graph.add_edge(Edge {
                source: source.to_string(),
                target: target.to_string(),
                weight,
                label: record.get_or_empty(&columns.label).trim().to_string(),
            });
        }

        Ok(graph)
    }

    /// Insert an edge; a repeated (source, target) pair replaces the earlier attributes
    pub fn add_edge(&mut self, edge: Edge) {
        for name in [&edge.source, &edge.target] {
            if !self.nodes.iter().any(|n| n == name) {
                self.nodes.push(name.clone());
            }
        }

        let key = (edge.source.clone(), edge.target.clone());
        match self.edge_index.get(&key) {
            Some(&idx) => self.edges[idx] = edge,
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(edge);
            }
        }
    }

    /// Node names in first-appearance order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of the weights of all edges touching `node`
    pub fn weighted_degree(&self, node: &str) -> f64 {
        self.edges
            .iter()
            .map(|e| {
                let mut total = 0.0;
                if e.source == node {
                    total += e.weight;
                }
                if e.target == node {
                    total += e.weight;
                }
                total
            })
            .sum()
    }

    /// Graphviz DOT text for a static plot
    pub fn to_dot(&self, title: &str, categories: &[NodeCategory], default_color: &str) -> String {
        let mut lines = vec![
            "digraph network {".to_string(),
            format!("  label=\"{}\";", escape_dot(title)),
            "  labelloc=t;".to_string(),
            "  fontsize=16;".to_string(),
            "  layout=neato;".to_string(),
            "  overlap=false;".to_string(),
            "  node [shape=circle, style=filled, fontsize=10, fontname=\"Helvetica-Bold\"];".to_string(),
            "  edge [color=gray, fontsize=10, fontcolor=darkred];".to_string(),
        ];

        for node in &self.nodes {
            let size = (self.weighted_degree(node) * DOT_SIZE_PER_DEGREE).max(0.3);
            lines.push(format!(
                "  \"{}\" [label=\"{}\", fillcolor=\"{}\", width={:.2}];",
                escape_dot(node),
                escape_dot(&wrap_label(node, LABEL_WIDTH)),
                node_color(node, categories, default_color),
                size
            ));
        }

        for edge in &self.edges {
            lines.push(format!(
                "  \"{}\" -> \"{}\" [label=\"{}\", penwidth={:.2}];",
                escape_dot(&edge.source),
                escape_dot(&edge.target),
                escape_dot(&edge.label),
                edge.weight / 2.0
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    /// vis-network data and options for the interactive view
    pub fn to_vis_json(&self, categories: &[NodeCategory], default_color: &str) -> Value {
        let nodes: Vec<Value> = self
            .nodes
            .iter()
            .map(|node| {
                json!({
                    "id": node,
                    "label": node,
                    "title": node,
                    "color": node_color(node, categories, default_color),
                })
            })
            .collect();

        let edges: Vec<Value> = self
            .edges
            .iter()
            .map(|edge| {
                json!({
                    "from": edge.source,
                    "to": edge.target,
                    "value": edge.weight,
                    "title": edge.label,
                    "arrows": "to",
                })
            })
            .collect();

        json!({
            "nodes": nodes,
            "edges": edges,
            "options": vis_options(),
        })
    }
}

/// Barnes-Hut physics settings for the interactive view
pub fn vis_options() -> Value {
    json!({
        "physics": {
            "barnesHut": {
                "gravitationalConstant": -8000,
                "centralGravity": 0.3,
                "springLength": 95,
                "springConstant": 0.04,
                "damping": 0.09,
                "avoidOverlap": 0
            },
            "minVelocity": 0.75
        }
    })
}

fn parse_weight(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    raw.parse::<f64>()
        .ok()
        .or_else(|| raw.replace(',', ".").parse::<f64>().ok())
        .filter(|w| w.is_finite())
}

/// Color of the first category with a fragment contained in `node`
pub fn node_color<'a>(node: &str, categories: &'a [NodeCategory], default_color: &'a str) -> &'a str {
    categories
        .iter()
        .find(|c| c.contains.iter().any(|fragment| node.contains(fragment.as_str())))
        .map(|c| c.color.as_str())
        .unwrap_or(default_color)
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub fn wrap_label(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
