use thiserror::Error;

/// Main error type for the travel assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gemini API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required argument '{field}' for {function}")]
    MissingArgument { function: String, field: String },

    #[error("Invalid arguments for {function}: {message}")]
    InvalidArguments { function: String, message: String },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid function call: {0}")]
    InvalidFunctionCall(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Maximum iterations exceeded: {0}")]
    MaxIterations(usize),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AssistantError>;

impl AssistantError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            AssistantError::Http(err) => err.is_timeout() || err.is_connect(),
            AssistantError::RateLimit { .. } => true,
            AssistantError::Timeout(_) => true,
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AssistantError::Config(_) => "CONFIG_ERROR",
            AssistantError::Api(_) => "API_ERROR",
            AssistantError::Http(_) => "HTTP_ERROR",
            AssistantError::Serialization(_) => "SERIALIZATION_ERROR",
            AssistantError::Validation(_) => "VALIDATION_ERROR",
            AssistantError::MissingArgument { .. } => "MISSING_ARGUMENT",
            AssistantError::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            AssistantError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            AssistantError::InvalidFunctionCall(_) => "INVALID_FUNCTION_CALL",
            AssistantError::Timeout(_) => "TIMEOUT_ERROR",
            AssistantError::MaxIterations(_) => "MAX_ITERATIONS_EXCEEDED",
            AssistantError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            AssistantError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rate_limit_payload_is_retryable() {
        let payload = AssistantError::RateLimit { retry_after: 7 }.to_error_payload();
        assert_eq!(
            payload,
            json!({
                "error": {
                    "code": "RATE_LIMIT_ERROR",
                    "message": "Rate limit exceeded: retry after 7s",
                    "retryable": true
                }
            })
        );
    }

    #[test]
    fn test_unknown_payload() {
        let payload = AssistantError::Unknown("boom".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "UNKNOWN_ERROR");
        assert_eq!(payload["error"]["message"], "Unknown error: boom");
        assert_eq!(payload["error"]["retryable"], false);
    }

    #[test]
    fn test_argument_errors_are_not_retryable() {
        let err = AssistantError::MissingArgument {
            function: "getHotels".to_string(),
            field: "destination".to_string(),
        };
        assert_eq!(err.error_code(), "MISSING_ARGUMENT");
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_error_payload()["error"]["message"],
            "Missing required argument 'destination' for getHotels"
        );
    }
}
