use anyhow::Result;
use colored::Colorize;
use invdash_core::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::state::AppState;
use crate::ui::{format_card, format_step, print_status, selection_heading, StatusLevel};

/// JSON shape of an inventory run
#[derive(Debug, Serialize)]
struct InventoryReport<'a> {
    title: &'a str,
    steps: &'a [FacetStep],
    matches: usize,
    records: Vec<BTreeMap<String, String>>,
}

fn warn_malformed(selections: &[String]) {
    // Check for invalid selection formats and warn
    for selection in selections {
        if !selection.contains('=') {
            print_status(
                format!(
                    "Warning: Invalid selection format '{}'. Expected 'column=value'",
                    selection
                ),
                StatusLevel::Warning,
            );
        }
    }
}

/// Run the configured cascade and print the steps and matching cards
pub fn show_inventory(state: &AppState, selections: &[String], json: bool) -> Result<()> {
    warn_malformed(selections);

    let table = state.load_inventory()?;
    let inventory = &state.config.inventory;
    let choices = parse_selection_args(selections);
    let result = resolve_cascade(&table, &inventory.facets, &choices)?;

    if json {
        let report = InventoryReport {
            title: &state.config.title,
            steps: &result.steps,
            matches: result.outcome.len(),
            records: result
                .outcome
                .records()
                .iter()
                .map(|r| r.to_map().into_iter().collect())
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("# {}\n", state.get_title().bold());

    println!("{}", "## Filters".bold());
    for step in &result.steps {
        println!("- {}", format_step(step));
    }
    println!();

    if let Some(tag_step) = result
        .steps
        .iter()
        .rev()
        .find(|s| s.facet.kind == FacetKind::MultiValue)
    {
        let heading = tag_step
            .selected
            .as_deref()
            .map(selection_heading)
            .unwrap_or_default();
        println!("## {}: {}\n", tag_step.facet.column, heading);
    }

    match &result.outcome {
        FilterOutcome::NoMatches => {
            println!("_{}_", inventory.empty_message);
        }
        FilterOutcome::Matches(records) => {
            println!("**Matching Items:** {}\n", records.len());
            for record in records {
                println!(
                    "{}\n",
                    format_card(
                        record,
                        inventory.title_column.as_deref(),
                        &inventory.card_columns
                    )
                );
            }
        }
    }

    if let Some(footer) = &state.config.footer {
        println!("{}", footer.dimmed());
    }

    Ok(())
}

/// Print the options one facet offers after the earlier facets resolve
pub fn show_options(state: &AppState, facet_column: &str, selections: &[String]) -> Result<()> {
    warn_malformed(selections);

    let table = state.load_inventory()?;
    let choices = parse_selection_args(selections);

    let options = cascade_options(&table, &state.config.inventory.facets, facet_column, &choices)?;
    for option in options {
        println!("{}", option);
    }

    Ok(())
}
