use super::{
    function_call_utils::{interpret_response, ModelReply},
    response_handler::{
        packing_failure, parse_packing_response, parse_plan_response, planning_failure,
    },
};
use crate::{
    core::{
        assistant::TravelAssistant, conversation::Conversation, observer::StepLog,
        steps::PlanStep,
    },
    error::{AssistantError, Result},
    prompts::{packing_prompt, rag_context_prompt, structured_plan_prompt, user_prompt, SYSTEM_PROMPT},
    types::{
        gemini::{GenerateContentRequest, GenerateContentResponse},
        result::{PlanOutcome, TokenUsage},
        travel_plan::PlanSchema,
        trip_request::TripRequest,
    },
};
use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tokio::time::timeout;
use tracing::debug;

/// Mutable state of one planning run
struct PlanRun<'a> {
    log: StepLog<'a>,
    tokens: Option<TokenUsage>,
    iterations: usize,
}

impl PlanRun<'_> {
    fn record_usage(&mut self, response: &GenerateContentResponse) {
        if let Some(usage) = &response.usage_metadata {
            self.tokens.get_or_insert_with(TokenUsage::default).add(usage);
        }
    }
}

impl TravelAssistant {
    /// Plan a trip. Never fails: errors come back as the
    /// `{error: "Trip planning failed: ...", destination, status: "error"}`
    /// mapping with the error message as the raw response.
    pub async fn plan_trip(&self, request: &TripRequest, rag_context: Option<&str>) -> PlanOutcome {
        let start_time = Instant::now();
        let mut run = PlanRun {
            log: StepLog::new(self.observer()),
            tokens: None,
            iterations: 0,
        };

        let (response, raw_response) = match self.run_plan(request, rag_context, &mut run).await {
            Ok(pair) => pair,
            Err(err) => {
                let message = err.to_string();
                run.log.add_step(PlanStep::Failure {
                    message: message.clone(),
                });
                (planning_failure(&request.destination, &message), message)
            }
        };

        PlanOutcome {
            response,
            raw_response,
            schema: self.schema(),
            steps: run.log.into_steps(),
            iterations: run.iterations,
            duration: start_time.elapsed(),
            tokens: run.tokens,
        }
    }

    async fn run_plan(
        &self,
        request: &TripRequest,
        rag_context: Option<&str>,
        run: &mut PlanRun<'_>,
    ) -> Result<(Value, String)> {
        let context = merged_context(request, rag_context);

        // Flat plans use function calling; the typed schema is a single
        // structured-output prompt with no declarations.
        let (system, prompt, declarations) = match self.schema() {
            PlanSchema::Flat => (
                Some(SYSTEM_PROMPT),
                user_prompt(request, context.as_deref()),
                self.dispatcher().declarations(),
            ),
            PlanSchema::Typed => {
                let mut request = request.clone();
                if let Some(context) = context {
                    request.additional_context = context;
                }
                (
                    None,
                    structured_plan_prompt(&request, &Utc::now().to_rfc3339()),
                    Vec::new(),
                )
            }
        };

        let mut conversation = Conversation::new(system);
        conversation.push_user(prompt.clone());
        run.log.add_step(PlanStep::Prompt {
            content: prompt,
            system: system.map(str::to_string),
        });

        // Gemini rejects a JSON response mime type alongside function
        // declarations; the final text is still parsed as JSON.
        let mut generation = self.config().generation.to_generation_config();
        if !declarations.is_empty() {
            generation.response_mime_type = None;
        }
        let max_iterations = self.config().max_iterations;

        loop {
            run.iterations += 1;
            debug!(
                target: "tripagent::plan",
                iteration = run.iterations,
                messages = conversation.len(),
                "sending planning turn"
            );

            let turn = conversation.to_request(generation.clone(), declarations.clone());
            let response = self.send(&turn).await?;
            run.record_usage(&response);

            match interpret_response(&response)? {
                ModelReply::FunctionCalls { content, calls } => {
                    // No turn is left to hand results back in
                    if run.iterations >= max_iterations {
                        return Err(AssistantError::MaxIterations(max_iterations));
                    }
                    conversation.push_model(content);

                    let mut results = Vec::with_capacity(calls.len());
                    for call in &calls {
                        run.log.add_step(PlanStep::FunctionCall {
                            name: call.name.clone(),
                            arguments: call.args.clone(),
                        });

                        let result = self.dispatcher().execute_function_call(call).await;
                        run.log.add_step(PlanStep::FunctionResult {
                            name: result.name.clone(),
                            result: result.response.clone(),
                            is_error: result.is_error,
                            duration_ms: result.duration_ms,
                        });
                        results.push(result);
                    }

                    conversation.push_function_results(&results);
                }
                ModelReply::Text(raw) => {
                    let parsed = parse_plan_response(&raw).into_value();
                    run.log.add_step(PlanStep::FinalResponse {
                        raw: raw.clone(),
                        parsed: parsed.clone(),
                    });
                    return Ok((parsed, raw));
                }
            }
        }
    }

    /// Ask for a packing list in one turn. Unparseable replies fall back to a
    /// fixed list; errors come back as `{error, destination}`.
    pub async fn generate_packing_list(
        &self,
        destination: &str,
        dates: &[String],
        activities: &[String],
        weather: Option<&Value>,
    ) -> Value {
        let mut log = StepLog::new(self.observer());
        let prompt = packing_prompt(destination, dates, activities, weather);

        let mut conversation = Conversation::new(None);
        conversation.push_user(prompt.clone());
        log.add_step(PlanStep::Prompt {
            content: prompt,
            system: None,
        });

        let request =
            conversation.to_request(self.config().generation.to_generation_config(), Vec::new());

        let reply = match self.send(&request).await {
            Ok(response) => interpret_response(&response),
            Err(err) => Err(err),
        };

        match reply {
            Ok(ModelReply::Text(raw)) => {
                let parsed = parse_packing_response(&raw, destination).into_value();
                log.add_step(PlanStep::FinalResponse {
                    raw,
                    parsed: parsed.clone(),
                });
                parsed
            }
            Ok(ModelReply::FunctionCalls { .. }) => {
                let parsed = parse_packing_response("", destination).into_value();
                log.add_step(PlanStep::FinalResponse {
                    raw: String::new(),
                    parsed: parsed.clone(),
                });
                parsed
            }
            Err(err) => {
                let message = err.to_string();
                log.add_step(PlanStep::Failure {
                    message: message.clone(),
                });
                packing_failure(destination, &message)
            }
        }
    }

    /// One model turn, bounded by the turn budget so transport retries
    /// inside the backend can run to completion.
    async fn send(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let limit = self.config().turn_timeout();
        timeout(limit, self.backend().generate_content(request))
            .await
            .map_err(|_| {
                AssistantError::Timeout(format!("Gemini request timed out after {limit:?}"))
            })?
    }
}

/// The request's own context followed by the wrapped retrieved knowledge
fn merged_context(request: &TripRequest, rag_context: Option<&str>) -> Option<String> {
    let rag = rag_context
        .filter(|text| !text.trim().is_empty())
        .map(rag_context_prompt)?;
    if request.additional_context.trim().is_empty() {
        Some(rag)
    } else {
        Some(format!("{}\n\n{}", request.additional_context, rag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_context() {
        let request = TripRequest::new("Delhi", "Goa", "2025-09-15", "2025-09-20");
        assert_eq!(merged_context(&request, None), None);
        assert_eq!(merged_context(&request, Some("  ")), None);

        let merged = merged_context(&request, Some("Monsoon ends in October")).unwrap();
        assert!(merged.starts_with("Use the following travel knowledge"));

        let request = request.with_additional_context("Honeymoon");
        let merged = merged_context(&request, Some("Monsoon ends in October")).unwrap();
        assert!(merged.starts_with("Honeymoon\n\n"));
        assert!(merged.contains("Monsoon ends in October"));
    }
}
