use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One row of a loaded table
///
/// Cells are kept as text exactly as read; identity is the data-row position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub row: usize,
    columns: Arc<[String]>,
    cells: Vec<String>,
}

impl Record {
    pub(crate) fn new(row: usize, columns: Arc<[String]>, cells: Vec<String>) -> Self {
        Self { row, columns, cells }
    }

    /// Get a cell by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.cells.get(idx))
            .map(String::as_str)
    }

    /// Get a cell by column name, treating a missing column as an empty cell
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Iterate over (column, cell) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(String::as_str))
    }

    /// Collect the record into a column -> cell map
    pub fn to_map(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// An immutable, ordered table of records sharing one header
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Build a table from a header and raw rows
    /// Short rows are padded with empty cells, long rows are truncated
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let columns: Arc<[String]> = headers.clone().into();
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, mut cells)| {
                cells.resize(width, String::new());
                Record::new(row, Arc::clone(&columns), cells)
            })
            .collect();

        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// How a facet column is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Whole-cell, case-sensitive equality
    Exact,
    /// Comma-separated tags, matched case-insensitively by substring
    MultiValue,
}

/// A column designated as a filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetSpec {
    pub column: String,
    pub kind: FacetKind,
}

impl FacetSpec {
    pub fn exact(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: FacetKind::Exact,
        }
    }

    pub fn multi_value(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: FacetKind::MultiValue,
        }
    }
}

/// A chosen value for one facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub facet: FacetSpec,
    pub value: String,
}

impl Selection {
    pub fn new(facet: FacetSpec, value: impl Into<String>) -> Self {
        Self {
            facet,
            value: value.into(),
        }
    }
}

/// Result of filtering a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Matches(Vec<Record>),
    /// No record satisfies the selections; a valid, non-error state
    NoMatches,
}

impl FilterOutcome {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        if records.is_empty() {
            FilterOutcome::NoMatches
        } else {
            FilterOutcome::Matches(records)
        }
    }

    pub fn records(&self) -> &[Record] {
        match self {
            FilterOutcome::Matches(records) => records,
            FilterOutcome::NoMatches => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilterOutcome::NoMatches)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }
}

/// One resolved step of a cascading selection
#[derive(Debug, Clone, Serialize)]
pub struct FacetStep {
    pub facet: FacetSpec,
    pub options: Vec<String>,
    /// None when the scope was empty and nothing could be offered
    pub selected: Option<String>,
}

/// All steps of a cascade plus the records that survived it
#[derive(Debug, Clone)]
pub struct CascadeResult {
    pub steps: Vec<FacetStep>,
    pub outcome: FilterOutcome,
}

impl CascadeResult {
    /// The resolved selection sequence, in facet order
    pub fn selections(&self) -> Vec<Selection> {
        self.steps
            .iter()
            .filter_map(|step| {
                step.selected
                    .as_ref()
                    .map(|value| Selection::new(step.facet.clone(), value.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["Component".to_string(), "Result".to_string()]
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::from_rows(headers(), vec![vec!["A".to_string()]]);
        assert_eq!(table.records()[0].get("Result"), Some(""));
        assert_eq!(table.records()[0].get("Missing"), None);
        assert_eq!(table.records()[0].get_or_empty("Missing"), "");
    }

    #[test]
    fn test_records_keep_positional_identity() {
        let table = Table::from_rows(
            headers(),
            vec![
                vec!["A".to_string(), "X".to_string()],
                vec!["B".to_string(), "Y".to_string()],
            ],
        );
        let rows: Vec<usize> = table.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(table.records()[1].to_map().get("Component").unwrap(), "B");
    }

    #[test]
    fn test_facet_kind_serde_names() {
        let spec: FacetSpec =
            serde_json::from_value(serde_json::json!({"column": "Tags", "kind": "multi_value"}))
                .unwrap();
        assert_eq!(spec, FacetSpec::multi_value("Tags"));
    }

    #[test]
    fn test_empty_outcome_is_no_matches() {
        let outcome = FilterOutcome::from_records(Vec::new());
        assert_eq!(outcome, FilterOutcome::NoMatches);
        assert!(outcome.records().is_empty());
    }
}
