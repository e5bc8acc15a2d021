use crate::{
    core::function_call::FunctionCall,
    error::{AssistantError, Result},
    types::gemini::{Content, GenerateContentResponse, ROLE_MODEL},
};

/// What the model's reply asks us to do next
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ModelReply {
    /// One or more calls to run. `content` is the model turn to keep in history.
    FunctionCalls {
        content: Content,
        calls: Vec<FunctionCall>,
    },
    /// Final answer text
    Text(String),
}

/// Read the first candidate of a `generateContent` response
pub(crate) fn interpret_response(response: &GenerateContentResponse) -> Result<ModelReply> {
    let candidate = response.candidates.first().ok_or_else(|| {
        AssistantError::Api("Gemini response contained no candidates".to_string())
    })?;

    let content = match &candidate.content {
        Some(content) => content,
        None => {
            return Err(AssistantError::Api(format!(
                "Gemini candidate has no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )))
        }
    };

    let calls: Vec<FunctionCall> = content
        .parts
        .iter()
        .filter_map(|part| part.function_call.clone())
        .map(FunctionCall::from)
        .collect();

    if !calls.is_empty() {
        let mut content = content.clone();
        if content.role.is_none() {
            content.role = Some(ROLE_MODEL.to_string());
        }
        return Ok(ModelReply::FunctionCalls { content, calls });
    }

    let text = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect::<Vec<_>>()
        .join("");

    Ok(ModelReply::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::gemini::{Candidate, Part};
    use serde_json::json;

    #[test]
    fn test_function_calls_in_reply_order() {
        let response = GenerateContentResponse::from_parts(vec![
            Part::text("Let me check."),
            Part::function_call("getWeather", json!({"location": "Goa"})),
            Part::function_call("getHotels", json!({"destination": "Goa"})),
        ]);

        match interpret_response(&response).unwrap() {
            ModelReply::FunctionCalls { content, calls } => {
                assert_eq!(content.parts.len(), 3);
                let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["getWeather", "getHotels"]);
            }
            other => panic!("expected function calls, got {other:?}"),
        }
    }

    #[test]
    fn test_text_parts_are_joined() {
        let response =
            GenerateContentResponse::from_parts(vec![Part::text("{\"itinerary\":"), Part::text("[]}")]);
        assert_eq!(
            interpret_response(&response).unwrap(),
            ModelReply::Text("{\"itinerary\":[]}".to_string())
        );
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let err = interpret_response(&GenerateContentResponse::default()).unwrap_err();
        assert!(matches!(err, AssistantError::Api(_)));

        let blocked = GenerateContentResponse {
            candidates: vec![Candidate {
                content: None,
                finish_reason: Some("SAFETY".to_string()),
            }],
            usage_metadata: None,
        };
        assert!(interpret_response(&blocked)
            .unwrap_err()
            .to_string()
            .contains("SAFETY"));
    }
}
