use crate::error::{DashboardError, Result};
use crate::models::Table;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

/// Candidate delimiters tried by auto-detection, in tie-break order
pub const SNIFF_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Field delimiter of a tabular source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Fixed(u8),
    /// Pick the most frequent candidate in the header line
    Auto,
}

impl Delimiter {
    /// Parse a configured delimiter: "auto", "\t", "tab" or a single ASCII character
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Delimiter::Auto),
            "\t" | "\\t" | "tab" => Some(Delimiter::Fixed(b'\t')),
            _ => {
                let bytes = value.as_bytes();
                if bytes.len() == 1 && bytes[0].is_ascii() && bytes[0] != b'"' {
                    Some(Delimiter::Fixed(bytes[0]))
                } else {
                    None
                }
            }
        }
    }
}

/// Where and how to read a table
#[derive(Debug, Clone)]
pub struct TableSource {
    pub path: PathBuf,
    pub delimiter: Delimiter,
    /// Columns that must be present in the header
    pub facet_columns: Vec<String>,
    /// Skip rows with more fields than the header instead of failing
    pub skip_bad_rows: bool,
    /// Drop the first data row when it repeats the header verbatim
    pub drop_repeated_header: bool,
}

impl TableSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: Delimiter) -> Self {
        Self {
            path: path.into(),
            delimiter,
            facet_columns: Vec::new(),
            skip_bad_rows: false,
            drop_repeated_header: false,
        }
    }

    pub fn with_facet_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facet_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip_bad_rows(mut self, skip: bool) -> Self {
        self.skip_bad_rows = skip;
        self
    }

    pub fn drop_repeated_header(mut self, drop: bool) -> Self {
        self.drop_repeated_header = drop;
        self
    }
}

/// Guess the delimiter from the first line of the input
/// Bytes inside double-quoted fields are not counted
pub fn sniff_delimiter(contents: &str) -> u8 {
    let header = contents.lines().next().unwrap_or("");

    let mut counts = [0usize; SNIFF_CANDIDATES.len()];
    let mut in_quotes = false;
    for byte in header.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            if let Some(idx) = SNIFF_CANDIDATES.iter().position(|c| *c == byte) {
                counts[idx] += 1;
            }
        }
    }

    let mut best = SNIFF_CANDIDATES[0];
    let mut best_count = 0;
    for (candidate, count) in SNIFF_CANDIDATES.iter().zip(counts) {
        if count > best_count {
            best = *candidate;
            best_count = count;
        }
    }

    best
}

fn normalize_header(name: &str) -> String {
    name.trim().nfc().collect()
}

/// Parse delimited text into a table; every cell is kept as text
pub fn parse_table(contents: &str, source: &TableSource) -> Result<Table> {
    let delimiter = match source.delimiter {
        Delimiter::Fixed(d) => d,
        Delimiter::Auto => {
            let d = sniff_delimiter(contents);
            let shown = (d as char).escape_default().to_string();
            debug!(path = %source.path.display(), delimiter = %shown, "sniffed delimiter");
            d
        }
    };

    // A leading BOM would otherwise stick to the first column name
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DashboardError::unreadable(&source.path, e))?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(DashboardError::unreadable(&source.path, "missing header row"));
    }

    for column in &source.facet_columns {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::UnknownFacet {
                facet: column.clone(),
                available: headers,
            });
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DashboardError::unreadable(&source.path, e))?;

        // Short rows are padded by the table; only extra fields are malformed
        if record.len() > headers.len() {
            if source.skip_bad_rows {
                warn!(
                    path = %source.path.display(),
                    row = idx + 1,
                    expected = headers.len(),
                    found = record.len(),
                    "skipping malformed row"
                );
                continue;
            }
            return Err(DashboardError::unreadable(
                &source.path,
                format!(
                    "row {} has {} fields, expected {}",
                    idx + 1,
                    record.len(),
                    headers.len()
                ),
            ));
        }

        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if source.drop_repeated_header {
        if let Some(first) = rows.first() {
            let repeats = first
                .iter()
                .map(|c| normalize_header(c))
                .eq(headers.iter().cloned());
            if repeats {
                rows.remove(0);
            }
        }
    }

    debug!(path = %source.path.display(), rows = rows.len(), columns = headers.len(), "loaded table");
    Ok(Table::from_rows(headers, rows))
}

/// Load a table from a delimited file
pub fn load_table(source: &TableSource) -> Result<Table> {
    let contents = read_text(&source.path)?;
    parse_table(&contents, source)
}

/// Read a file as UTF-8, falling back to Latin-1 for legacy spreadsheet exports
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| DashboardError::unreadable(path, e))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "file is not UTF-8, decoding as Latin-1");
            Ok(err.into_bytes().iter().map(|&b| b as char).collect())
        }
    }
}
