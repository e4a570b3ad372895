use crate::error::{DashboardError, Result};
use crate::models::{
    CascadeResult, FacetKind, FacetSpec, FacetStep, FilterOutcome, Record, Selection, Table,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

/// Option value meaning "no constraint" for a multi-value facet
pub const ALL_SENTINEL: &str = "all";

/// Delimiter between tags in a multi-value cell
pub const TAG_DELIMITER: char = ',';

/// Split a multi-value cell into trimmed, lowercased, non-empty tags
pub fn parse_tags(cell: &str) -> Vec<String> {
    cell.split(TAG_DELIMITER)
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Lowercased, trimmed form of a whole cell used for tag matching
pub fn normalize_cell(cell: &str) -> String {
    cell.trim().to_lowercase()
}

/// Parse "column=value" strings into a choice map
/// Entries without '=' are skipped; a later entry for the same column wins
pub fn parse_selection_args(args: &[String]) -> HashMap<String, String> {
    let mut choices = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            choices.insert(
                key.trim().nfc().collect::<String>(),
                value.trim().to_string(),
            );
        }
    }

    choices
}

/// Check a record against a single selection
///
/// Multi-value facets match by substring containment over the whole
/// normalized cell, so "arroz" also matches a cell tagged "Arrozales".
pub fn matches_selection(record: &Record, selection: &Selection) -> bool {
    let cell = record.get_or_empty(&selection.facet.column);

    match selection.facet.kind {
        FacetKind::Exact => cell == selection.value,
        FacetKind::MultiValue => {
            let wanted = selection.value.trim().to_lowercase();
            if wanted == ALL_SENTINEL {
                return true;
            }
            normalize_cell(cell).contains(&wanted)
        }
    }
}

/// Check a record against every selection (AND)
pub fn matches_all(record: &Record, selections: &[Selection]) -> bool {
    selections.iter().all(|s| matches_selection(record, s))
}

fn ensure_facet(table: &Table, facet: &FacetSpec) -> Result<()> {
    if table.has_column(&facet.column) {
        Ok(())
    } else {
        Err(DashboardError::UnknownFacet {
            facet: facet.column.clone(),
            available: table.headers().to_vec(),
        })
    }
}

fn ensure_selections(table: &Table, selections: &[Selection]) -> Result<()> {
    selections
        .iter()
        .try_for_each(|selection| ensure_facet(table, &selection.facet))
}

/// Valid values for `facet` over the records that survive `prior`
///
/// Exact facets yield their distinct non-empty values in ascending order.
/// Multi-value facets yield the sentinel first, then the distinct tags in
/// ascending order.
pub fn options_for(table: &Table, prior: &[Selection], facet: &FacetSpec) -> Result<Vec<String>> {
    ensure_facet(table, facet)?;
    ensure_selections(table, prior)?;

    let scope = table.iter().filter(|record| matches_all(record, prior));

    let options = match facet.kind {
        FacetKind::Exact => {
            let values: BTreeSet<&str> = scope
                .map(|record| record.get_or_empty(&facet.column))
                .filter(|value| !value.is_empty())
                .collect();
            values.into_iter().map(str::to_string).collect()
        }
        FacetKind::MultiValue => {
            let tags: BTreeSet<String> = scope
                .flat_map(|record| parse_tags(record.get_or_empty(&facet.column)))
                .filter(|tag| tag != ALL_SENTINEL)
                .collect();
            std::iter::once(ALL_SENTINEL.to_string())
                .chain(tags)
                .collect()
        }
    };

    Ok(options)
}

/// Apply every selection, keeping table order
pub fn filter(table: &Table, selections: &[Selection]) -> Result<FilterOutcome> {
    ensure_selections(table, selections)?;

    let records: Vec<Record> = table
        .iter()
        .filter(|record| matches_all(record, selections))
        .cloned()
        .collect();

    debug!(
        total = table.len(),
        matched = records.len(),
        selections = selections.len(),
        "filtered table"
    );

    Ok(FilterOutcome::from_records(records))
}

/// Walk the configured facets in order, resolving each choice against
/// the options left by the previous ones
///
/// A choice that is not offered falls back to the first option. When a
/// facet has nothing to offer the cascade stops with no matches.
pub fn resolve_cascade(
    table: &Table,
    facets: &[FacetSpec],
    choices: &HashMap<String, String>,
) -> Result<CascadeResult> {
    let mut steps = Vec::with_capacity(facets.len());
    let mut selections: Vec<Selection> = Vec::with_capacity(facets.len());

    for facet in facets {
        let options = options_for(table, &selections, facet)?;

        if facet.kind == FacetKind::Exact && options.is_empty() {
            debug!(facet = %facet.column, "no options left, stopping cascade");
            steps.push(FacetStep {
                facet: facet.clone(),
                options,
                selected: None,
            });
            return Ok(CascadeResult {
                steps,
                outcome: FilterOutcome::NoMatches,
            });
        }

        let selected = pick_choice(facet, &options, choices.get(&facet.column));
        selections.push(Selection::new(facet.clone(), selected.clone()));
        steps.push(FacetStep {
            facet: facet.clone(),
            options,
            selected: Some(selected),
        });
    }

    for column in choices.keys() {
        if !facets.iter().any(|f| &f.column == column) {
            warn!(column = %column, "choice for a column that is not a configured facet");
        }
    }

    let outcome = filter(table, &selections)?;
    Ok(CascadeResult { steps, outcome })
}

/// Options of the facet named `column` once every facet configured before
/// it has been resolved the way the cascade resolves it
///
/// Earlier facets without a choice take their first option. If the cascade
/// stops before reaching `column`, the scope is empty.
pub fn cascade_options(
    table: &Table,
    facets: &[FacetSpec],
    column: &str,
    choices: &HashMap<String, String>,
) -> Result<Vec<String>> {
    let Some(position) = facets.iter().position(|f| f.column == column) else {
        return Err(DashboardError::UnknownFacet {
            facet: column.to_string(),
            available: facets.iter().map(|f| f.column.clone()).collect(),
        });
    };
    let earlier = &facets[..position];
    let facet = &facets[position];

    let earlier_choices: HashMap<String, String> = choices
        .iter()
        .filter(|(key, _)| earlier.iter().any(|f| &f.column == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let result = resolve_cascade(table, earlier, &earlier_choices)?;

    if result.steps.iter().any(|step| step.selected.is_none()) {
        ensure_facet(table, facet)?;
        return Ok(match facet.kind {
            FacetKind::Exact => Vec::new(),
            FacetKind::MultiValue => vec![ALL_SENTINEL.to_string()],
        });
    }

    options_for(table, &result.selections(), facet)
}

fn pick_choice(facet: &FacetSpec, options: &[String], wanted: Option<&String>) -> String {
    let default = options
        .first()
        .cloned()
        .unwrap_or_else(|| ALL_SENTINEL.to_string());

    let Some(wanted) = wanted else {
        return default;
    };

    let normalized = match facet.kind {
        FacetKind::Exact => wanted.clone(),
        FacetKind::MultiValue => wanted.trim().to_lowercase(),
    };

    if options.iter().any(|o| o == &normalized) {
        normalized
    } else {
        warn!(
            facet = %facet.column,
            wanted = %wanted,
            fallback = %default,
            "choice not offered for facet, using default"
        );
        default
    }
}
