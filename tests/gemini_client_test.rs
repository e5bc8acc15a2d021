use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use trip_agent_rs::{
    gemini::{Content, GenerateContentRequest},
    AssistantConfig, AssistantError, GeminiClient, ModelBackend, TravelAssistant, TripRequest,
};

const MODEL: &str = "gemini-2.5-flash";

fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
    let mut client = GeminiClient::new("test-key", MODEL, Duration::from_secs(5)).unwrap();
    client.set_base_url(server.url());
    client.set_max_retries(0);
    client
}

fn hello_request() -> GenerateContentRequest {
    GenerateContentRequest::new(vec![Content::user_text("Plan Goa")])
}

#[tokio::test]
async fn test_generate_content_reads_function_calls() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{
                            "functionCall": {
                                "name": "getWeather",
                                "args": {"location": "Goa", "dates": ["2025-09-15"]}
                            }
                        }]
                    },
                    "finishReason": "STOP"
                }],
                "usageMetadata": {
                    "promptTokenCount": 10,
                    "candidatesTokenCount": 5,
                    "totalTokenCount": 15
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = client_for(&server)
        .generate_content(&hello_request())
        .await
        .unwrap();
    mock.assert_async().await;

    let candidate = &response.candidates[0];
    assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
    let call = candidate.content.as_ref().unwrap().parts[0]
        .function_call
        .as_ref()
        .unwrap();
    assert_eq!(call.name, "getWeather");
    assert_eq!(call.args["location"], "Goa");
    assert_eq!(response.usage_metadata.unwrap().total_token_count, 15);
}

#[tokio::test]
async fn test_http_error_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .with_status(400)
        .with_body(r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate_content(&hello_request())
        .await
        .unwrap_err();

    match err {
        AssistantError::Api(message) => {
            assert!(message.contains("400"));
            assert!(message.contains("API key not valid"));
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_without_retries() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
        .with_status(429)
        .with_header("retry-after", "7")
        .with_body("slow down")
        .create_async()
        .await;

    let err = client_for(&server)
        .generate_content(&hello_request())
        .await
        .unwrap_err();

    assert!(matches!(err, AssistantError::RateLimit { retry_after: 7 }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_plan_trip_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro-latest:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Regex("functionDeclarations".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "{\"itinerary\": [{\"day\": 1, \"activities\": [\"Baga Beach\"]}]}"}]
                    },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = AssistantConfig::new("test-key")
        .with_base_url(server.url())
        .with_max_retries(0);
    let assistant = TravelAssistant::new(config).unwrap();
    let request = TripRequest::new("Delhi", "Goa", "2025-09-15", "2025-09-20");

    let outcome = assistant.plan_trip(&request, None).await;
    mock.assert_async().await;

    assert!(!outcome.is_error(), "unexpected error: {}", outcome.response);
    assert_eq!(outcome.response["itinerary"][0]["activities"][0], "Baga Beach");
    assert_eq!(outcome.plan().unwrap().itinerary_days(), 1);
}
