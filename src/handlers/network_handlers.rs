use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::state::AppState;
use crate::ui::{format_graph_summary, format_table, print_status, StatusLevel};
use crate::NetworkFormat;

/// Export or summarize a network, then print its interpretation table
pub fn show_network(
    state: &AppState,
    name: &str,
    format: NetworkFormat,
    output: Option<&Path>,
) -> Result<()> {
    let config = &state.config;
    let view = config.network(name)?;
    let graph = state.load_network(view)?;
    let title = view.title.clone().unwrap_or_else(|| view.name.clone());

    let rendered = match format {
        NetworkFormat::Summary => {
            format_graph_summary(&graph, &config.node_categories, &config.default_color)
        }
        NetworkFormat::Dot => graph.to_dot(&title, &config.node_categories, &config.default_color),
        NetworkFormat::Vis => serde_json::to_string_pretty(
            &graph.to_vis_json(&config.node_categories, &config.default_color),
        )?,
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write network export: {}", path.display()))?;
            print_status(
                format!("Network '{}' written to {}", view.name, path.display()),
                StatusLevel::Success,
            );
        }
        None => {
            if format == NetworkFormat::Summary {
                println!("# {}\n", title.bold());
            }
            println!("{}", rendered);
        }
    }

    // Exports on stdout stay machine-readable
    if output.is_none() && format != NetworkFormat::Summary {
        return Ok(());
    }

    if let Some(interpretation) = state.load_interpretation(view) {
        println!("\n## Interpretation ({})\n", view.name);
        match interpretation {
            Ok(table) => println!("{}", format_table(&table)),
            // The graph already rendered; a broken interpretation only loses this section
            Err(err) => print_status(format!("Warning: {:#}", err), StatusLevel::Warning),
        }
    }

    Ok(())
}
