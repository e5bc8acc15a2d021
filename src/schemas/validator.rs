use crate::{
    error::{AssistantError, Result},
    schemas::validation::validate_against_schema,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Validation strategies for function-call arguments
#[derive(Debug, Clone, Default)]
pub enum Validator {
    /// Typed deserialization only
    #[default]
    SerdeFirst,
    /// JSON Schema check against the function declaration, then typed deserialization
    Strict(StrictValidator),
}

impl Validator {
    /// Validate and deserialize the arguments of `function` into `T`
    pub fn validate<T: DeserializeOwned>(&self, function: &str, params: Value) -> Result<T> {
        match self {
            Validator::SerdeFirst => serde_first_validate(function, params),
            Validator::Strict(validator) => validator.validate(function, params),
        }
    }
}

fn serde_first_validate<T: DeserializeOwned>(function: &str, params: Value) -> Result<T> {
    serde_path_to_error::deserialize(params).map_err(|err| {
        let message = err.inner().to_string();
        match missing_field(&message) {
            Some(field) => AssistantError::MissingArgument {
                function: function.to_string(),
                field,
            },
            None => AssistantError::InvalidArguments {
                function: function.to_string(),
                message: format!("at {}: {}", err.path(), message),
            },
        }
    })
}

/// Pull the field name out of serde's "missing field `x`" message.
fn missing_field(message: &str) -> Option<String> {
    let rest = message.split("missing field `").nth(1)?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

/// Validates arguments against registered declaration schemas before
/// deserializing them
#[derive(Debug, Clone, Default)]
pub struct StrictValidator {
    schemas: HashMap<String, Value>,
}

impl StrictValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the parameter schema for a function
    pub fn register_schema(&mut self, function: &str, schema: Value) {
        self.schemas.insert(function.to_string(), schema);
    }

    pub fn validate<T: DeserializeOwned>(&self, function: &str, params: Value) -> Result<T> {
        if let Some(schema) = self.schemas.get(function) {
            validate_against_schema(schema, function, &params).map_err(|err| {
                AssistantError::InvalidArguments {
                    function: function.to_string(),
                    message: err.to_string(),
                }
            })?;
        }
        serde_first_validate(function, params)
    }
}

/// Accepts `2`, `2.0` and `"2"` for integer arguments.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_u32(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a non-negative integer, got {value}"))
    })
}

fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return u32::try_from(n).ok();
            }
            let f = number.as_f64()?;
            if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) {
                Some(f as u32)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
