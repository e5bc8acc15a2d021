use serde_json::{json, Map, Value};

use super::{
    attractions::AttractionsTool, flights::FlightsTool, hotels::HotelsTool, tool::ToolRegistry,
    weather::WeatherTool, TravelFunction,
};
use crate::{
    core::function_call::{FunctionCall, FunctionExecution, FunctionResult},
    error::{AssistantError, Result},
    schemas::{StrictValidator, Validator},
    types::gemini::FunctionDeclaration,
};

/// Routes model function calls to the matching data provider
#[derive(Debug)]
pub struct FunctionDispatcher {
    registry: ToolRegistry,
    validator: Validator,
}

impl FunctionDispatcher {
    /// Dispatcher with all four providers registered
    pub fn new(weather_api_key: Option<String>) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(WeatherTool::with_api_key(weather_api_key));
        registry.register(FlightsTool::new());
        registry.register(HotelsTool::new());
        registry.register(AttractionsTool::new());
        Self::with_registry(registry)
    }

    pub fn with_registry(registry: ToolRegistry) -> Self {
        Self {
            registry,
            validator: Validator::SerdeFirst,
        }
    }

    /// Check arguments against each declaration's JSON schema before deserializing
    pub fn strict(mut self) -> Self {
        let mut strict = StrictValidator::new();
        for tool in self.registry.list() {
            strict.register_schema(tool.name(), tool.parameters_schema());
        }
        self.validator = Validator::Strict(strict);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Declarations advertised to the model
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.registry.declarations()
    }

    /// Run one call. Unknown names yield an error payload; argument
    /// failures are returned as `Err`.
    pub async fn dispatch(&self, call: &FunctionCall) -> Result<Value> {
        let Some(function) = TravelFunction::from_name(&call.name) else {
            return Ok(json!({ "error": format!("Unknown function: {}", call.name) }));
        };

        let tool = self
            .registry
            .get(function)
            .ok_or_else(|| AssistantError::ToolNotFound(call.name.clone()))?;

        tool.execute(normalize_args(&call.args)?, &self.validator)
            .await
    }

    /// Run one call and always produce a payload to feed back to the model
    pub async fn execute_function_call(&self, call: &FunctionCall) -> FunctionResult {
        let execution = FunctionExecution::start(call.clone());
        let response = match self.dispatch(call).await {
            Ok(value) => value,
            Err(err) => json!({ "error": format!("Function execution failed: {}", err) }),
        };
        execution.complete(response)
    }
}

impl Default for FunctionDispatcher {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Calls with no arguments arrive as `null`
fn normalize_args(args: &Value) -> Result<Value> {
    match args {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(args.clone()),
        other => Err(AssistantError::InvalidFunctionCall(format!(
            "arguments must be an object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_each_function() {
        let dispatcher = FunctionDispatcher::default();
        let cases = [
            (
                "getWeather",
                json!({"location": "Goa", "dates": ["2025-09-15"]}),
                "forecast",
            ),
            (
                "getFlights",
                json!({"from_location": "Delhi", "to_location": "Goa", "departure_date": "2025-09-15", "travelers": 2}),
                "outbound_flights",
            ),
            (
                "getHotels",
                json!({"destination": "Goa", "check_in": "2025-09-15", "check_out": "2025-09-20", "travelers": 2}),
                "hotels",
            ),
            (
                "getAttractions",
                json!({"destination": "Goa", "preferences": ["beach"]}),
                "recommended_attractions",
            ),
        ];

        for (name, args, key) in cases {
            let value = dispatcher
                .dispatch(&FunctionCall::new(name, args))
                .await
                .unwrap();
            assert!(value.get(key).is_some(), "{name} missing {key}");
        }
    }

    #[tokio::test]
    async fn test_unknown_function_is_not_an_error() {
        let dispatcher = FunctionDispatcher::default();
        let value = dispatcher
            .dispatch(&FunctionCall::new("getTrains", json!({})))
            .await
            .unwrap();
        assert_eq!(value, json!({"error": "Unknown function: getTrains"}));
    }

    #[tokio::test]
    async fn test_missing_required_field_surfaces() {
        let dispatcher = FunctionDispatcher::default();
        let call = FunctionCall::new("getHotels", json!({"destination": "Goa"}));

        let err = dispatcher.dispatch(&call).await.unwrap_err();
        assert!(matches!(err, AssistantError::MissingArgument { ref field, .. } if field == "check_in"));

        let result = dispatcher.execute_function_call(&call).await;
        assert!(result.is_error);
        assert_eq!(
            result.response["error"],
            "Function execution failed: Missing required argument 'check_in' for getHotels"
        );
    }

    #[tokio::test]
    async fn test_null_arguments_treated_as_empty() {
        let dispatcher = FunctionDispatcher::default();
        let err = dispatcher
            .dispatch(&FunctionCall::new("getAttractions", Value::Null))
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::MissingArgument { .. }));
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_wrong_types() {
        let dispatcher = FunctionDispatcher::default().strict();
        let err = dispatcher
            .dispatch(&FunctionCall::new(
                "getAttractions",
                json!({"destination": "Goa", "preferences": "beach"}),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::InvalidArguments { .. }));
    }

    #[test]
    fn test_declarations_cover_function_table() {
        let names: Vec<String> = FunctionDispatcher::default()
            .declarations()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec!["getWeather", "getFlights", "getHotels", "getAttractions"]
        );
    }
}
