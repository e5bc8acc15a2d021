use async_trait::async_trait;

use crate::{
    error::Result,
    types::gemini::{GenerateContentRequest, GenerateContentResponse},
};

/// Anything that can answer a `generateContent` request.
///
/// [`GeminiClient`](super::gemini_client::GeminiClient) is the HTTP
/// implementation; tests plug in scripted backends.
#[async_trait]
pub trait ModelBackend: Send + Sync + std::fmt::Debug {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}
