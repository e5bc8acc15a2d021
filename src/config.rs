//! Environment-sourced configuration for the travel assistant.

use std::{env, time::Duration};

use crate::{
    error::{AssistantError, Result},
    types::{gemini::GenerationConfig, travel_plan::PlanSchema},
};

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const WEATHER_API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const GEMINI_BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_FUNCTION_CALLING_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_STRUCTURED_MODEL: &str = "gemini-2.5-flash";
/// First wait between transport retries; doubles on each retry
pub const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Sampling knobs sent with every `generateContent` request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// Ask the service for `application/json` output
    pub json_output: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 4096,
            json_output: true,
        }
    }
}

impl GenerationSettings {
    /// Lower temperature preset used with the typed plan schema.
    pub fn structured() -> Self {
        Self {
            temperature: 0.3,
            ..Self::default()
        }
    }

    pub fn to_generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
            top_k: Some(self.top_k),
            max_output_tokens: Some(self.max_output_tokens),
            response_mime_type: self.json_output.then(|| "application/json".to_string()),
        }
    }
}

/// Everything a [`TravelAssistant`](crate::TravelAssistant) needs to talk to Gemini.
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub api_key: String,
    pub weather_api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_iterations: usize,
    pub max_retries: usize,
    pub generation: GenerationSettings,
    pub schema: PlanSchema,
}

impl AssistantConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            weather_api_key: None,
            model: DEFAULT_FUNCTION_CALLING_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            max_iterations: 10,
            max_retries: 3,
            generation: GenerationSettings::default(),
            schema: PlanSchema::Flat,
        }
    }

    /// Read `GEMINI_API_KEY` (required) plus the optional weather key,
    /// base URL and model overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AssistantError::Config(format!(
                "{GEMINI_API_KEY_ENV} environment variable must be set before creating a TravelAssistant"
            ))
        })?;

        let mut config = Self::new(api_key);
        config.weather_api_key = env::var(WEATHER_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if let Ok(base_url) = env::var(GEMINI_BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Ok(model) = env::var(GEMINI_MODEL_ENV) {
            config.model = model;
        }
        Ok(config)
    }

    pub fn with_weather_api_key(mut self, key: impl Into<String>) -> Self {
        self.weather_api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }

    /// Switch the plan schema. Selecting the typed schema also applies the
    /// structured generation preset and model unless they were customised.
    pub fn with_schema(mut self, schema: PlanSchema) -> Self {
        if schema == PlanSchema::Typed {
            if self.generation == GenerationSettings::default() {
                self.generation = GenerationSettings::structured();
            }
            if self.model == DEFAULT_FUNCTION_CALLING_MODEL {
                self.model = DEFAULT_STRUCTURED_MODEL.to_string();
            }
        }
        self.schema = schema;
        self
    }

    /// Upper bound for one model turn: every transport attempt plus the
    /// doubling backoff between them.
    pub fn turn_timeout(&self) -> Duration {
        let retries = u32::try_from(self.max_retries).unwrap_or(u32::MAX);
        let backoff = RETRY_BACKOFF.saturating_mul(2u32.saturating_pow(retries).saturating_sub(1));
        self.timeout
            .saturating_mul(retries.saturating_add(1))
            .saturating_add(backoff)
    }

    /// Fail fast on configuration that can never reach the service.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::Config(format!(
                "Gemini API key must be provided or set in {GEMINI_API_KEY_ENV}"
            )));
        }
        if self.max_iterations == 0 {
            return Err(AssistantError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generation_settings() {
        let config = GenerationSettings::default().to_generation_config();
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.top_k, Some(40));
        assert_eq!(config.max_output_tokens, Some(4096));
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_typed_schema_applies_structured_preset() {
        let config = AssistantConfig::new("key").with_schema(PlanSchema::Typed);
        assert_eq!(config.generation.temperature, 0.3);
        assert_eq!(config.model, DEFAULT_STRUCTURED_MODEL);
    }

    #[test]
    fn test_typed_schema_keeps_custom_model() {
        let config = AssistantConfig::new("key")
            .with_model("gemini-custom")
            .with_schema(PlanSchema::Typed);
        assert_eq!(config.model, "gemini-custom");
    }

    #[test]
    fn test_turn_timeout_covers_retries() {
        let config = AssistantConfig::new("key")
            .with_timeout(Duration::from_secs(10))
            .with_max_retries(2);
        // three attempts plus 250ms and 500ms of backoff
        assert_eq!(config.turn_timeout(), Duration::from_millis(30_750));

        let single = config.with_max_retries(0);
        assert_eq!(single.turn_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let err = AssistantConfig::new("  ").validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
