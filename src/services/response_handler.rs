use serde_json::{json, Value};

pub(crate) const PARSE_FAILURE: &str = "Failed to parse AI response";

pub(crate) const DEFAULT_PACKING_LIST: [&str; 8] = [
    "Comfortable walking shoes",
    "Sunscreen and sunglasses",
    "Weather-appropriate clothing",
    "Travel documents and ID",
    "Phone charger and power bank",
    "First aid kit",
    "Camera or smartphone",
    "Travel adapter (if needed)",
];

/// How the final model text was read
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedReply {
    /// A JSON object
    Object(Value),
    /// Anything else; carries the fallback mapping
    Fallback(Value),
}

impl ParsedReply {
    pub(crate) fn into_value(self) -> Value {
        match self {
            ParsedReply::Object(value) | ParsedReply::Fallback(value) => value,
        }
    }
}

/// Parse final model text as a JSON object. Invalid JSON and non-object
/// values both yield `{error: "Failed to parse AI response", raw_response}`.
pub(crate) fn parse_plan_response(raw: &str) -> ParsedReply {
    match parse_json_object(raw) {
        Some(value) => ParsedReply::Object(value),
        None => ParsedReply::Fallback(json!({
            "error": PARSE_FAILURE,
            "raw_response": raw,
        })),
    }
}

/// Parse packing-list text, substituting the default list on failure
pub(crate) fn parse_packing_response(raw: &str, destination: &str) -> ParsedReply {
    match parse_json_object(raw) {
        Some(value) => ParsedReply::Object(value),
        None => ParsedReply::Fallback(default_packing_list(destination)),
    }
}

pub(crate) fn default_packing_list(destination: &str) -> Value {
    json!({
        "packing_list": DEFAULT_PACKING_LIST,
        "destination": destination,
        "weather_considerations": "Pack according to local weather conditions",
    })
}

/// Uniform mapping for a planning run that could not complete
pub(crate) fn planning_failure(destination: &str, message: &str) -> Value {
    json!({
        "error": format!("Trip planning failed: {message}"),
        "destination": destination,
        "status": "error",
    })
}

pub(crate) fn packing_failure(destination: &str, message: &str) -> Value {
    json!({
        "error": format!("Failed to generate packing list: {message}"),
        "destination": destination,
    })
}

fn parse_json_object(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}
