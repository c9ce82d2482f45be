//! Validate tool call arguments against the declared parameters before execution.

use super::catalog::ToolParameters;

/// Validate tool arguments against a tool's parameter schema.
///
/// Performs top-level validation: required field presence and property type
/// verification. Returns `Err(message)` describing the first violation found.
pub fn validate_arguments(
    args: &serde_json::Map<String, serde_json::Value>,
    parameters: &ToolParameters,
) -> Result<(), String> {
    for name in &parameters.required {
        if !args.contains_key(name) {
            return Err(format!("missing required field '{name}'"));
        }
    }

    for (key, value) in args {
        let Some(expected_type) = parameters
            .properties
            .get(key)
            .and_then(|schema| schema.get("type"))
            .and_then(|v| v.as_str())
        else {
            continue;
        };
        if !value_matches_type(value, expected_type) {
            return Err(format!(
                "field '{}' expected type '{}', got {}",
                key,
                expected_type,
                json_type_name(value)
            ));
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn status_parameters() -> ToolParameters {
        ToolParameters {
            kind: "object".into(),
            properties: json!({"status": {"type": "string"}})
                .as_object()
                .cloned()
                .unwrap_or_default(),
            required: BTreeSet::from(["status".to_string()]),
            default: None,
        }
    }

    fn args(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn accepts_matching_arguments() {
        assert!(validate_arguments(&args(json!({"status": "hi"})), &status_parameters()).is_ok());
    }

    #[test]
    fn rejects_missing_required_field() {
        let err = validate_arguments(&args(json!({})), &status_parameters()).unwrap_err();
        assert_eq!(err, "missing required field 'status'");
    }

    #[test]
    fn rejects_wrong_type() {
        let err = validate_arguments(&args(json!({"status": 42})), &status_parameters()).unwrap_err();
        assert!(err.contains("expected type 'string'"));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let result = validate_arguments(
            &args(json!({"status": "hi", "extra": true})),
            &status_parameters(),
        );
        assert!(result.is_ok());
    }
}
