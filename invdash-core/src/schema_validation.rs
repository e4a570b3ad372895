use serde_json::Value;

/// Validate data against JSON Schema
/// Returns Ok(()) if valid, Err with list of validation errors if invalid
pub fn validate_against_schema(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    // Compile the JSON Schema
    let compiled = jsonschema::validator_for(schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|error| {
            // Format validation error with path
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            format!("{} at {}", error, location)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_schema;
    use serde_json::json;

    #[test]
    fn test_valid_config_passes() {
        let data = json!({
            "title": "Dashboard",
            "inventory": {
                "path": "inventory.csv",
                "facets": [{"column": "Componente", "kind": "exact"}]
            },
            "galleries": [
                {"name": "Cafe", "dir": "data", "stem": "Cafe", "count": 7}
            ]
        });

        let result = validate_against_schema(&config_schema(), &data);
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_inventory_fails() {
        let data = json!({"title": "Dashboard"});

        let result = validate_against_schema(&config_schema(), &data);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_reports_location() {
        let data = json!({
            "title": "Dashboard",
            "inventory": {"path": "inventory.csv", "facets": []},
            "galleries": [{"name": "Cafe", "dir": "data", "stem": "Cafe", "count": -1}]
        });

        let errors = validate_against_schema(&config_schema(), &data).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("/galleries/0/count"));
    }

    #[test]
    fn test_every_error_is_collected() {
        let data = json!({"title": 3, "inventory": {"facets": "none"}});

        let errors = validate_against_schema(&config_schema(), &data).unwrap_err();
        assert!(errors.len() >= 3);
        assert!(errors.iter().any(|e| e.ends_with("at /title")));
    }
}
