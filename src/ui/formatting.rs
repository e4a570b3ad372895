use invdash_core::{
    node_color, FacetKind, FacetStep, NodeCategory, Record, RelationshipGraph, Table, ALL_SENTINEL,
};

/// Format a record as a product card
pub fn format_card(record: &Record, title_column: Option<&str>, card_columns: &[String]) -> String {
    let mut lines = Vec::new();

    let title = match title_column {
        Some(column) => format!("{} {}", column, record.get_or_empty(column)),
        None => format!("Row {}", record.row + 1),
    };
    lines.push(format!("┌ {}", title));

    // With no card columns configured, show everything except the title
    let columns: Vec<&str> = if card_columns.is_empty() {
        record
            .iter()
            .map(|(column, _)| column)
            .filter(|column| Some(*column) != title_column)
            .collect()
    } else {
        card_columns.iter().map(String::as_str).collect()
    };

    for column in columns {
        lines.push(format!("│ {}: {}", column, record.get_or_empty(column)));
    }
    lines.push("└".to_string());

    lines.join("\n")
}

/// Format one cascade step as "column: a [b] c", bracketing the selection
pub fn format_step(step: &FacetStep) -> String {
    if step.options.is_empty() {
        return format!("{}: (no options)", step.facet.column);
    }

    let options: Vec<String> = step
        .options
        .iter()
        .map(|option| {
            if step.selected.as_deref() == Some(option.as_str()) {
                format!("[{}]", option)
            } else {
                option.clone()
            }
        })
        .collect();

    let kind = match step.facet.kind {
        FacetKind::Exact => "",
        FacetKind::MultiValue => " (tags)",
    };

    format!("{}{}: {}", step.facet.column, kind, options.join(" "))
}

/// Heading for the chosen tag of a multi-value facet
pub fn selection_heading(value: &str) -> String {
    if value == ALL_SENTINEL {
        return "All".to_string();
    }

    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a table as aligned plain-text columns
pub fn format_table(table: &Table) -> String {
    let headers = table.headers();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for record in table {
        for (idx, (_, cell)) in record.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(headers.iter().map(String::as_str).collect())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for record in table {
        lines.push(render_row(record.iter().map(|(_, cell)| cell).collect()));
    }

    lines.join("\n")
}

/// Node and edge listing of a graph, nodes by descending weighted degree
pub fn format_graph_summary(
    graph: &RelationshipGraph,
    categories: &[NodeCategory],
    default_color: &str,
) -> String {
    let mut nodes: Vec<(&String, f64)> = graph
        .nodes()
        .iter()
        .map(|n| (n, graph.weighted_degree(n)))
        .collect();
    nodes.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut lines = vec![format!(
        "Nodes ({}), by weighted degree:",
        graph.nodes().len()
    )];
    for (name, degree) in nodes {
        lines.push(format!(
            "  {:>6.1}  {} [{}]",
            degree,
            name,
            node_color(name, categories, default_color)
        ));
    }

    lines.push(format!("Edges ({}):", graph.edges().len()));
    for edge in graph.edges() {
        let label = if edge.label.is_empty() {
            String::new()
        } else {
            format!(" ({})", edge.label)
        };
        lines.push(format!(
            "  {} -> {} w={}{}",
            edge.source, edge.target, edge.weight, label
        ));
    }

    lines.join("\n")
}
