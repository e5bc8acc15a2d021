use super::{
    response::parse_plan_document,
    travel_plan::{PlanSchema, TravelPlanDocument},
};
use crate::{
    core::steps::PlanStep,
    error::{AssistantError, Result},
    schemas::validation::validate_structured_payload,
    types::gemini::UsageMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// What a planning run hands back: the mapping, the raw text and a trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Parsed plan, or one of the `{error, ...}` fallback mappings
    pub response: Value,
    /// Final model text, or the error message when the run failed
    pub raw_response: String,
    pub schema: PlanSchema,
    pub steps: Vec<PlanStep>,
    /// Model turns taken
    pub iterations: usize,
    pub duration: Duration,
    pub tokens: Option<TokenUsage>,
}

/// Token usage summed across turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn add(&mut self, usage: &UsageMetadata) {
        self.prompt_tokens += usage.prompt_token_count;
        self.completion_tokens += usage.candidates_token_count;
        self.total_tokens += usage.total_token_count;
    }
}

impl From<&UsageMetadata> for TokenUsage {
    fn from(usage: &UsageMetadata) -> Self {
        let mut tokens = TokenUsage::default();
        tokens.add(usage);
        tokens
    }
}

impl PlanOutcome {
    /// Whether the caller should distrust the response (it carries `error`)
    pub fn is_error(&self) -> bool {
        self.response.get("error").is_some()
    }

    /// The `(parsed, raw)` pair
    pub fn into_parts(self) -> (Value, String) {
        (self.response, self.raw_response)
    }

    /// Typed view of the plan under the schema the prompt declared
    pub fn plan(&self) -> Result<TravelPlanDocument> {
        if self.is_error() {
            return Err(AssistantError::Validation(format!(
                "planning did not produce a plan: {}",
                self.response["error"]
            )));
        }
        parse_plan_document(&self.response, self.schema)
    }

    /// Check the response against the JSON schema of its plan type. Advisory;
    /// day counts are not checked.
    pub fn validate(&self) -> Result<()> {
        validate_structured_payload(self.schema.handle(), &self.response)
    }

    pub fn function_call_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, PlanStep::FunctionCall { .. }))
            .count()
    }

    /// Names of the functions called, in order
    pub fn functions_called(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PlanStep::FunctionCall { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Error payloads from function results, plus the failure message if any
    pub fn errors(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PlanStep::FunctionResult {
                    result,
                    is_error: true,
                    ..
                } => Some(result.to_string()),
                PlanStep::Failure { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Generate a human-readable replay of the run
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Trip Planning Trace ===".to_string());
        lines.push(format!("Schema: {}", self.schema));
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Iterations: {}", self.iterations));

        if let Some(tokens) = &self.tokens {
            lines.push(format!(
                "Tokens: {} prompt + {} completion = {} total",
                tokens.prompt_tokens, tokens.completion_tokens, tokens.total_tokens
            ));
        }

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        lines.push(String::new());
        lines.push("--- Response ---".to_string());
        lines.push(
            serde_json::to_string_pretty(&self.response).unwrap_or_else(|_| self.response.to_string()),
        );

        lines.join("\n")
    }
}
