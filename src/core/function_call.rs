use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::types::gemini::{FunctionCallPart, Part};

/// A function call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Wire name of the function, e.g. `getWeather`
    pub name: String,
    /// Argument mapping as sent by the model
    pub args: Value,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Get a human-readable description
    pub fn describe(&self) -> String {
        format!("{}({})", self.name, self.args)
    }
}

impl From<FunctionCallPart> for FunctionCall {
    fn from(part: FunctionCallPart) -> Self {
        Self {
            name: part.name,
            args: part.args,
        }
    }
}

/// The payload answered back to the model for one call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResult {
    pub name: String,
    pub response: Value,
    /// Whether the payload carries a top-level `error` key
    pub is_error: bool,
    pub duration_ms: Option<u128>,
}

impl FunctionResult {
    pub fn new(name: impl Into<String>, response: Value) -> Self {
        let is_error = has_error_key(&response);
        Self {
            name: name.into(),
            response,
            is_error,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis());
        self
    }

    /// `functionResponse` part for the next turn
    pub fn to_part(&self) -> Part {
        Part::function_response(self.name.clone(), self.response.clone())
    }
}

/// Tracks one call from dispatch to result
#[derive(Debug)]
pub struct FunctionExecution {
    pub call: FunctionCall,
    start_time: Instant,
}

impl FunctionExecution {
    pub fn start(call: FunctionCall) -> Self {
        Self {
            call,
            start_time: Instant::now(),
        }
    }

    pub fn complete(self, response: Value) -> FunctionResult {
        let duration = self.start_time.elapsed();
        FunctionResult::new(self.call.name, response).with_duration(duration)
    }
}

pub(crate) fn has_error_key(value: &Value) -> bool {
    value
        .get("error")
        .map(|err| !err.is_null())
        .unwrap_or(false)
}
