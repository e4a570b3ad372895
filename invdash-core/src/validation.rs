use crate::config::{DashboardConfig, GalleryConfig, NetworkColumns, NetworkView};
use crate::io::Delimiter;
use std::collections::HashSet;

/// Validate a dashboard configuration
/// Returns Ok(()) if valid, or Err(Vec<String>) with validation errors
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.title.trim().is_empty() {
        errors.push("Dashboard title cannot be empty".to_string());
    }

    validate_inventory(config, &mut errors);
    validate_networks(&config.networks, &mut errors);
    validate_network_columns(&config.network_columns, &mut errors);

    for (idx, category) in config.node_categories.iter().enumerate() {
        if category.color.trim().is_empty() {
            errors.push(format!("Node category #{} has an empty color", idx + 1));
        }
        if category.contains.iter().all(|s| s.trim().is_empty()) {
            errors.push(format!(
                "Node category #{} ('{}') must list at least one name fragment",
                idx + 1,
                category.color
            ));
        }
    }

    validate_galleries(&config.galleries, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_inventory(config: &DashboardConfig, errors: &mut Vec<String>) {
    let inventory = &config.inventory;

    if inventory.path.as_os_str().is_empty() {
        errors.push("Inventory path cannot be empty".to_string());
    }

    if Delimiter::parse(&inventory.delimiter).is_none() {
        errors.push(format!(
            "Inventory delimiter '{}' must be a single character or 'auto'",
            inventory.delimiter
        ));
    }

    if inventory.facets.is_empty() {
        errors.push("At least one inventory facet must be defined".to_string());
    }

    let mut seen = HashSet::new();
    for facet in &inventory.facets {
        if facet.column.trim().is_empty() {
            errors.push("Facet column names cannot be empty".to_string());
        } else if !seen.insert(&facet.column) {
            errors.push(format!("Facet '{}' is defined more than once", facet.column));
        }
    }

    if let Some(title) = &inventory.title_column {
        if title.trim().is_empty() {
            errors.push("Card title column cannot be empty".to_string());
        }
    }

    for column in &inventory.card_columns {
        if column.trim().is_empty() {
            errors.push("Card columns cannot be empty".to_string());
        }
    }
}

fn validate_networks(networks: &[NetworkView], errors: &mut Vec<String>) {
    let mut names = HashSet::new();

    for (idx, view) in networks.iter().enumerate() {
        let view_ref = format!("Network #{} ('{}')", idx + 1, view.name);

        if view.name.trim().is_empty() {
            errors.push(format!("{}: name cannot be empty", view_ref));
        }
        if !names.insert(&view.name) {
            errors.push(format!("{}: duplicate network name", view_ref));
        }
        if view.edges.as_os_str().is_empty() {
            errors.push(format!("{}: edges path cannot be empty", view_ref));
        }
    }
}

fn validate_network_columns(columns: &NetworkColumns, errors: &mut Vec<String>) {
    let named = [
        ("source", &columns.source),
        ("target", &columns.target),
        ("weight", &columns.weight),
        ("label", &columns.label),
    ];

    for (role, name) in named {
        if name.trim().is_empty() {
            errors.push(format!("Network {} column cannot be empty", role));
        }
    }

    if columns.source == columns.target {
        errors.push(format!(
            "Network source and target columns must differ (both '{}')",
            columns.source
        ));
    }
}

fn validate_galleries(galleries: &[GalleryConfig], errors: &mut Vec<String>) {
    let mut names = HashSet::new();

    for (idx, gallery) in galleries.iter().enumerate() {
        let gallery_ref = format!("Gallery #{} ('{}')", idx + 1, gallery.name);

        if gallery.name.trim().is_empty() {
            errors.push(format!("{}: name cannot be empty", gallery_ref));
        }
        if !names.insert(&gallery.name) {
            errors.push(format!("{}: duplicate gallery name", gallery_ref));
        }
        if gallery.stem.trim().is_empty() {
            errors.push(format!("{}: file stem cannot be empty", gallery_ref));
        }
        if gallery.count == 0 {
            errors.push(format!("{}: must contain at least one image", gallery_ref));
        }
        if gallery.page_size == 0 {
            errors.push(format!("{}: page size must be at least 1", gallery_ref));
        }
        if gallery.extension.trim().is_empty() || gallery.extension.contains('.') {
            errors.push(format!(
                "{}: extension '{}' must be a bare suffix like 'jpg'",
                gallery_ref, gallery.extension
            ));
        }
    }
}
