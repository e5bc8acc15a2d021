use std::sync::Arc;

use crate::{
    config::AssistantConfig,
    core::observer::{PlanObserver, TracingObserver},
    error::Result,
    services::{backend::ModelBackend, gemini_client::GeminiClient},
    tools::FunctionDispatcher,
    types::travel_plan::PlanSchema,
};

/// Gemini travel assistant: plans trips with function calling and writes
/// packing lists.
///
/// ```rust,no_run
/// use trip_agent_rs::{TravelAssistant, TripRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let assistant = TravelAssistant::from_env()?;
///     let request = TripRequest::new("Delhi", "Goa", "2025-09-15", "2025-09-20")
///         .with_travelers(2)
///         .with_preferences(["beach"]);
///
///     let outcome = assistant.plan_trip(&request, None).await;
///     println!("{}", outcome.response);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TravelAssistant {
    config: AssistantConfig,
    backend: Arc<dyn ModelBackend>,
    dispatcher: FunctionDispatcher,
    observer: Arc<dyn PlanObserver>,
}

impl TravelAssistant {
    /// Build an assistant talking to Gemini over HTTP. Fails fast on a
    /// missing API key.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        config.validate()?;
        let client = GeminiClient::from_config(&config)?;
        Ok(Self::assemble(config, Arc::new(client)))
    }

    /// Read configuration from `GEMINI_API_KEY` and friends
    pub fn from_env() -> Result<Self> {
        Self::new(AssistantConfig::from_env()?)
    }

    /// Use a custom model backend instead of the HTTP client
    pub fn with_backend(config: AssistantConfig, backend: Arc<dyn ModelBackend>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, backend))
    }

    fn assemble(config: AssistantConfig, backend: Arc<dyn ModelBackend>) -> Self {
        let dispatcher = FunctionDispatcher::new(config.weather_api_key.clone());
        Self {
            config,
            backend,
            dispatcher,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn PlanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: FunctionDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations.max(1);
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn schema(&self) -> PlanSchema {
        self.config.schema
    }

    pub fn dispatcher(&self) -> &FunctionDispatcher {
        &self.dispatcher
    }

    pub(crate) fn backend(&self) -> &dyn ModelBackend {
        self.backend.as_ref()
    }

    pub(crate) fn observer(&self) -> &dyn PlanObserver {
        self.observer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistantError;

    #[test]
    fn test_empty_api_key_fails_fast() {
        let err = TravelAssistant::new(AssistantConfig::new("")).unwrap_err();
        assert!(matches!(err, AssistantError::Config(_)));
    }

    #[test]
    fn test_new_with_key() {
        let assistant = TravelAssistant::new(AssistantConfig::new("test-key")).unwrap();
        assert_eq!(assistant.schema(), PlanSchema::Flat);
        assert_eq!(assistant.dispatcher().declarations().len(), 4);
        assert_eq!(assistant.with_max_iterations(0).config().max_iterations, 1);
    }
}
