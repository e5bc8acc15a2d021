use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use super::backend::ModelBackend;
use crate::{
    config::AssistantConfig,
    error::{AssistantError, Result},
    types::gemini::{GenerateContentRequest, GenerateContentResponse},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the Gemini `generateContent` endpoint
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_retries: usize,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AssistantError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            max_retries: 3,
        })
    }

    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let mut client = Self::new(config.api_key.clone(), config.model.clone(), config.timeout)?;
        client.base_url = config.base_url.clone();
        client.max_retries = config.max_retries;
        Ok(client)
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn set_max_retries(&mut self, max_retries: usize) {
        self.max_retries = max_retries;
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        build_generate_url(&self.base_url, &self.model)
    }

    async fn post(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = self.endpoint();
        let mut attempt = 0;
        let mut backoff = crate::config::RETRY_BACKOFF;

        loop {
            debug!(target: "tripagent::http", %url, attempt, "sending generateContent request");

            let response = self
                .http
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .json(request)
                .send()
                .await?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response.text().await?;

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = headers
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(backoff);

                if attempt < self.max_retries {
                    warn!(target: "tripagent::http", ?retry_after, attempt, "rate limited, retrying");
                    tokio::time::sleep(retry_after).await;
                    attempt += 1;
                    backoff *= 2;
                    continue;
                }

                return Err(AssistantError::RateLimit {
                    retry_after: retry_after.as_secs().max(1),
                });
            }

            if status.is_server_error() && attempt < self.max_retries {
                warn!(target: "tripagent::http", %status, attempt, "server error, retrying");
                tokio::time::sleep(backoff).await;
                attempt += 1;
                backoff *= 2;
                continue;
            }

            if !status.is_success() {
                return Err(AssistantError::Api(format!(
                    "HTTP {} error: {}",
                    status,
                    api_error_message(&body)
                )));
            }

            let parsed: Value = serde_json::from_str(&body)?;
            if let Some(error) = parsed.get("error") {
                return Err(AssistantError::Api(
                    error
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string()),
                ));
            }

            return Ok(serde_json::from_value(parsed)?);
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.post(request).await
    }
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = model.trim_start_matches("models/");
    if trimmed.ends_with(":generateContent") {
        trimmed.to_string()
    } else if trimmed.ends_with("/v1beta") || trimmed.ends_with("/v1") {
        format!("{trimmed}/models/{model}:generateContent")
    } else {
        format!("{trimmed}/v1beta/models/{model}:generateContent")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generate_url() {
        assert_eq!(
            build_generate_url("https://generativelanguage.googleapis.com/", "gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            build_generate_url("http://localhost:8080/v1beta", "models/gemini-1.5-pro-latest"),
            "http://localhost:8080/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
        assert_eq!(
            build_generate_url("http://proxy/custom:generateContent", "ignored"),
            "http://proxy/custom:generateContent"
        );
    }

    #[test]
    fn test_api_error_message_prefers_error_message() {
        assert_eq!(
            api_error_message(r#"{"error":{"code":400,"message":"API key not valid"}}"#),
            "API key not valid"
        );
        assert_eq!(api_error_message("bad gateway"), "bad gateway");
    }
}
