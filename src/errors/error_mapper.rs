use invdash_core::DashboardError;

/// Map dashboard errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_dashboard_error(error: &anyhow::Error) -> (String, String, String) {
    let Some(dashboard_error) = error.downcast_ref::<DashboardError>() else {
        return (
            "Error".to_string(),
            "The command failed.".to_string(),
            format!("{:#}", error),
        );
    };

    match dashboard_error {
        DashboardError::SourceUnreadable { path, reason } => {
            if reason.contains("No such file") || reason.contains("cannot find") {
                (
                    "File Not Found".to_string(),
                    "A data file could not be found.".to_string(),
                    format!(
                        "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                        path.display()
                    ),
                )
            } else if reason.contains("Permission denied") {
                (
                    "Permission Denied".to_string(),
                    "Permission denied.".to_string(),
                    format!("You don't have permission to read this file:\n{}", path.display()),
                )
            } else {
                (
                    "Error Reading Data".to_string(),
                    "A data file could not be parsed.".to_string(),
                    format!("Path: {}\n\n{}", path.display(), reason),
                )
            }
        }
        DashboardError::UnknownFacet { facet, available } => (
            "Unknown Facet".to_string(),
            format!("The table has no column named '{}'.", facet),
            format!("Available columns: {}", available.join(", ")),
        ),
        DashboardError::MissingColumn { column, path } => (
            "Missing Column".to_string(),
            format!("Column '{}' is required but missing.", column),
            format!("Path: {}", path.display()),
        ),
        DashboardError::InvalidConfig(errors) => (
            "Validation Error".to_string(),
            "The dashboard configuration has validation errors.".to_string(),
            errors
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{}. {}", i + 1, e))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        DashboardError::UnknownView(name) => (
            "Unknown View".to_string(),
            format!("No network or gallery named '{}' is configured.", name),
            "Run 'invdash views' to list the configured views.".to_string(),
        ),
    }
}
