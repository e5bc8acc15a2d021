use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observable step of a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanStep {
    /// Prompt sent on the first turn
    Prompt {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        system: Option<String>,
    },
    /// The model asked for a function call
    FunctionCall { name: String, arguments: Value },
    /// The dispatcher answered a call
    FunctionResult {
        name: String,
        result: Value,
        is_error: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u128>,
    },
    /// Final text from the model and what it parsed to
    FinalResponse { raw: String, parsed: Value },
    /// The run was aborted
    Failure { message: String },
}

impl PlanStep {
    /// Get a human-readable description of the step
    pub fn describe(&self) -> String {
        match self {
            PlanStep::Prompt { content, .. } => {
                format!("🧭 Prompt: {}", truncate(content, 120))
            }
            PlanStep::FunctionCall { name, arguments } => {
                format!("🔧 Call: {}({})", name, arguments)
            }
            PlanStep::FunctionResult {
                name,
                result,
                is_error,
                ..
            } => {
                if *is_error {
                    format!("❌ {} failed: {}", name, result)
                } else {
                    format!("👁 {} returned: {}", name, truncate(&result.to_string(), 160))
                }
            }
            PlanStep::FinalResponse { raw, .. } => {
                format!("✅ Final response: {}", truncate(raw, 160))
            }
            PlanStep::Failure { message } => format!("💥 Failure: {}", message),
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            PlanStep::FunctionResult { is_error, .. } => *is_error,
            PlanStep::Failure { .. } => true,
            _ => false,
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
