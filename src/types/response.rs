use std::any::{type_name, TypeId};

use serde_json::Value;

use crate::{
    error::{AssistantError, Result},
    schemas::{CompletionSchema, SchemaHandle},
    types::travel_plan::{FlatTravelPlan, PlanSchema, TravelPlan, TravelPlanDocument},
};

/// Deserialize a model payload into `T`, reporting the failing JSON path.
pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;

    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        AssistantError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })?;

    Ok(value)
}

/// Read a parsed plan as the variant its prompt declared
pub fn parse_plan_document(payload: &Value, schema: PlanSchema) -> Result<TravelPlanDocument> {
    match schema {
        PlanSchema::Flat => deserialize_structured_response::<FlatTravelPlan>(
            payload,
            FlatTravelPlan::schema(),
        )
        .map(TravelPlanDocument::Flat),
        PlanSchema::Typed => {
            deserialize_structured_response::<TravelPlan>(payload, TravelPlan::schema())
                .map(TravelPlanDocument::Typed)
        }
    }
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    let expected = TypeId::of::<T>();
    if schema.type_id() != expected {
        return Err(AssistantError::Validation(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_plan_document() {
        let payload = json!({
            "itinerary": [{"day": 1, "date": "2025-09-15", "activities": ["Baga Beach"], "meals": []}],
            "packing_list": ["Sunscreen"],
            "weather_forecast": "Warm"
        });

        let doc = parse_plan_document(&payload, PlanSchema::Flat).unwrap();
        assert_eq!(doc.schema(), PlanSchema::Flat);
        assert_eq!(doc.itinerary_days(), 1);
        assert_eq!(doc.packing_items(), vec!["Sunscreen"]);
    }

    #[test]
    fn test_error_names_failing_path() {
        let payload = json!({"itinerary": [{"day": "one"}]});
        let err = parse_plan_document(&payload, PlanSchema::Flat).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("FlatTravelPlan"), "{message}");
        assert!(message.contains("itinerary[0].day"), "{message}");
    }

    #[test]
    fn test_schema_type_mismatch() {
        let err = deserialize_structured_response::<TravelPlan>(
            &json!({}),
            FlatTravelPlan::schema(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not match target type"));
    }
}
