use super::tool::{unavailable, Tool, ToolFuture, TravelFunction};
use crate::schemas::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for weather lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherParams {
    pub location: String,
    /// Dates in YYYY-MM-DD format
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub temperature_high: i32,
    pub temperature_low: i32,
    pub condition: String,
    pub humidity: u32,
    pub wind_speed: u32,
    pub precipitation_chance: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub forecast: Vec<DailyForecast>,
    pub summary: String,
}

/// Weather forecast provider. Returns canned forecasts; a configured weather
/// key switches to the live-provider profile.
#[derive(Debug, Clone, Default)]
pub struct WeatherTool {
    api_key: Option<String>,
}

impl WeatherTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn forecast(&self, params: &WeatherParams) -> WeatherReport {
        let location = params.location.clone();
        let (high, low, condition, humidity, wind, precipitation, summary) = match self.api_key {
            None => (
                28,
                22,
                "Partly cloudy",
                65,
                12,
                20,
                format!(
                    "Pleasant weather expected in {location} with temperatures ranging from 22°C to 28°C"
                ),
            ),
            Some(_) => (
                30,
                24,
                "Sunny",
                60,
                8,
                10,
                format!("Generally sunny weather in {location} with highs around 30°C"),
            ),
        };

        let forecast = params
            .dates
            .iter()
            .map(|date| DailyForecast {
                date: date.clone(),
                temperature_high: high,
                temperature_low: low,
                condition: condition.to_string(),
                humidity,
                wind_speed: wind,
                precipitation_chance: precipitation,
            })
            .collect();

        WeatherReport {
            location,
            forecast,
            summary,
        }
    }

    /// Forecast as a JSON payload, or the weather error payload
    pub fn lookup(&self, params: &WeatherParams) -> Value {
        serde_json::to_value(self.forecast(params)).unwrap_or_else(|_| {
            let mut payload = unavailable("weather");
            payload["location"] = Value::String(params.location.clone());
            payload
        })
    }
}

impl Tool for WeatherTool {
    fn function(&self) -> TravelFunction {
        TravelFunction::GetWeather
    }

    fn description(&self) -> &'static str {
        "Get real-time weather forecast for a specific location and date range"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The destination city or location (e.g., 'Goa', 'New Delhi', 'Mumbai')"
                },
                "dates": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Array of dates in YYYY-MM-DD format for the forecast period"
                }
            },
            "required": ["location", "dates"]
        })
    }

    fn execute<'a>(&'a self, arguments: Value, validator: &'a Validator) -> ToolFuture<'a> {
        Box::pin(async move {
            let params: WeatherParams = validator.validate(self.name(), arguments)?;
            Ok(self.lookup(&params))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> WeatherParams {
        WeatherParams {
            location: "Goa".to_string(),
            dates: vec!["2025-09-15".to_string(), "2025-09-16".to_string()],
        }
    }

    #[test]
    fn test_mock_forecast_without_key() {
        let report = WeatherTool::new().forecast(&params());
        assert_eq!(report.forecast.len(), 2);
        assert_eq!(report.forecast[0].temperature_high, 28);
        assert_eq!(report.forecast[1].condition, "Partly cloudy");
        assert_eq!(
            report.summary,
            "Pleasant weather expected in Goa with temperatures ranging from 22°C to 28°C"
        );
    }

    #[test]
    fn test_keyed_forecast_profile() {
        let report = WeatherTool::with_api_key(Some("key".into())).forecast(&params());
        assert_eq!(report.forecast[0].temperature_high, 30);
        assert_eq!(report.forecast[0].precipitation_chance, 10);
        assert!(report.summary.starts_with("Generally sunny weather in Goa"));
    }

    #[test]
    fn test_blank_key_is_ignored() {
        let report = WeatherTool::with_api_key(Some("  ".into())).forecast(&params());
        assert_eq!(report.forecast[0].condition, "Partly cloudy");
    }

    #[tokio::test]
    async fn test_execute_requires_dates() {
        let err = WeatherTool::new()
            .execute(serde_json::json!({"location": "Goa"}), &Validator::SerdeFirst)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required argument 'dates' for getWeather"
        );
    }

    #[test]
    fn test_execute_with_dates() {
        let tool = WeatherTool::new();
        let arguments = serde_json::json!({"location": "Goa", "dates": ["2025-09-15"]});
        let value = tokio_test::block_on(tool.execute(arguments, &Validator::SerdeFirst)).unwrap();
        assert_eq!(value["location"], "Goa");
        assert_eq!(value["forecast"][0]["date"], "2025-09-15");
    }
}
