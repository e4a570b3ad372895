use std::path::PathBuf;

/// Errors raised by the dashboard core
///
/// An empty filter result is not an error; see [`crate::models::FilterOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// A tabular source could not be opened or parsed
    #[error("cannot read '{}': {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// A facet refers to a column the table does not have
    #[error("unknown facet '{facet}' (available columns: {})", available.join(", "))]
    UnknownFacet { facet: String, available: Vec<String> },

    /// A non-facet column required by a view is missing
    #[error("column '{column}' not found in '{}'", path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// The dashboard configuration failed validation
    #[error("invalid configuration:\n{}", .0.join("\n"))]
    InvalidConfig(Vec<String>),

    /// A named network or gallery is not configured
    #[error("no view named '{0}' is configured")]
    UnknownView(String),
}

impl DashboardError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DashboardError::SourceUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
