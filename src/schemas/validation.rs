use crate::{error::AssistantError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a parsed plan against the JSON schema of its declared type
pub(crate) fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> Result<(), AssistantError> {
    validate_against_schema(schema.schema_json(), schema.schema_name(), payload)
}

/// Validate any JSON value against a raw JSON schema, reporting up to three
/// failing instance paths
pub(crate) fn validate_against_schema(
    schema_json: &Value,
    schema_name: &str,
    payload: &Value,
) -> Result<(), AssistantError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema_json)
        .map_err(|err| {
            AssistantError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema_name, err
            ))
        })?;

    let detail = match validator.validate(payload) {
        Ok(()) => return Ok(()),
        Err(errors) => {
            let mut details = Vec::new();
            let mut truncated = false;

            for (idx, error) in errors.enumerate() {
                if idx == MAX_SCHEMA_ERRORS {
                    truncated = true;
                    break;
                }
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            }

            let mut detail = if details.is_empty() {
                "payload failed schema validation".to_string()
            } else {
                details.join("; ")
            };
            if truncated {
                detail.push_str("; additional errors truncated");
            }
            detail
        }
    };

    Err(AssistantError::Validation(format!(
        "Payload does not match `{}` schema: {}",
        schema_name, detail
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reports_missing_required_property() {
        let schema = json!({
            "type": "object",
            "properties": {"location": {"type": "string"}},
            "required": ["location"]
        });

        let err = validate_against_schema(&schema, "getWeather", &json!({})).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("getWeather"));
        assert!(message.contains("location"));
    }

    #[test]
    fn test_accepts_matching_payload() {
        let schema = json!({"type": "object", "properties": {"n": {"type": "integer"}}});
        assert!(validate_against_schema(&schema, "n", &json!({"n": 3})).is_ok());
    }
}
