use super::tool::{unavailable, Tool, ToolFuture, TravelFunction};
use crate::schemas::{validator::lenient_u32, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for flight searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightParams {
    pub from_location: String,
    pub to_location: String,
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default = "default_travelers", deserialize_with = "lenient_u32")]
    pub travelers: u32,
}

fn default_travelers() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub from: String,
    pub to: String,
    pub departure: String,
    #[serde(rename = "return")]
    pub return_date: Option<String>,
    pub travelers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub airline: String,
    pub flight_number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub price: String,
    pub booking_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearch {
    pub search_criteria: SearchCriteria,
    pub outbound_flights: Vec<FlightOffer>,
    pub return_flights: Vec<FlightOffer>,
    pub summary: String,
}

struct Schedule {
    airline: &'static str,
    flight_number: &'static str,
    departure_time: &'static str,
    arrival_time: &'static str,
    duration: &'static str,
    fare: u32,
    booking_url: &'static str,
}

const OUTBOUND: [Schedule; 2] = [
    Schedule {
        airline: "IndiGo",
        flight_number: "6E 123",
        departure_time: "08:30",
        arrival_time: "10:45",
        duration: "2h 15m",
        fare: 4500,
        booking_url: "https://www.goindigo.in/booking",
    },
    Schedule {
        airline: "Air India",
        flight_number: "AI 456",
        departure_time: "14:20",
        arrival_time: "16:40",
        duration: "2h 20m",
        fare: 5200,
        booking_url: "https://www.airindia.in/booking",
    },
];

const RETURN: [Schedule; 1] = [Schedule {
    airline: "IndiGo",
    flight_number: "6E 789",
    departure_time: "18:15",
    arrival_time: "20:30",
    duration: "2h 15m",
    fare: 4800,
    booking_url: "https://www.goindigo.in/booking",
}];

impl Schedule {
    /// Fare scales linearly with the number of travelers
    fn offer(&self, travelers: u32) -> FlightOffer {
        FlightOffer {
            airline: self.airline.to_string(),
            flight_number: self.flight_number.to_string(),
            departure_time: self.departure_time.to_string(),
            arrival_time: self.arrival_time.to_string(),
            duration: self.duration.to_string(),
            price: format!("₹{}", u64::from(self.fare) * u64::from(travelers)),
            booking_url: self.booking_url.to_string(),
        }
    }
}

/// Flight search provider with a fixed schedule
#[derive(Debug, Clone, Default)]
pub struct FlightsTool;

impl FlightsTool {
    pub fn new() -> Self {
        Self
    }

    pub fn search(&self, params: &FlightParams) -> FlightSearch {
        let travelers = params.travelers;
        let return_flights = match params.return_date {
            Some(_) => RETURN.iter().map(|s| s.offer(travelers)).collect(),
            None => Vec::new(),
        };

        FlightSearch {
            search_criteria: SearchCriteria {
                from: params.from_location.clone(),
                to: params.to_location.clone(),
                departure: params.departure_date.clone(),
                return_date: params.return_date.clone(),
                travelers,
            },
            outbound_flights: OUTBOUND.iter().map(|s| s.offer(travelers)).collect(),
            return_flights,
            summary: format!(
                "Found multiple flight options from {} to {}",
                params.from_location, params.to_location
            ),
        }
    }

    pub fn lookup(&self, params: &FlightParams) -> Value {
        serde_json::to_value(self.search(params)).unwrap_or_else(|_| unavailable("flight"))
    }
}

impl Tool for FlightsTool {
    fn function(&self) -> TravelFunction {
        TravelFunction::GetFlights
    }

    fn description(&self) -> &'static str {
        "Search for flight options between two locations with pricing and availability"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "from_location": {
                    "type": "string",
                    "description": "Departure city or airport code (e.g., 'Delhi', 'DEL', 'Mumbai')"
                },
                "to_location": {
                    "type": "string",
                    "description": "Destination city or airport code (e.g., 'Goa', 'GOI', 'Bangalore')"
                },
                "departure_date": {
                    "type": "string",
                    "description": "Departure date in YYYY-MM-DD format"
                },
                "return_date": {
                    "type": "string",
                    "description": "Return date in YYYY-MM-DD format (optional for one-way trips)"
                },
                "travelers": {
                    "type": "integer",
                    "description": "Number of travelers (adults)"
                }
            },
            "required": ["from_location", "to_location", "departure_date"]
        })
    }

    fn execute<'a>(&'a self, arguments: Value, validator: &'a Validator) -> ToolFuture<'a> {
        Box::pin(async move {
            let params: FlightParams = validator.validate(self.name(), arguments)?;
            Ok(self.lookup(&params))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(travelers: u32, return_date: Option<&str>) -> FlightParams {
        FlightParams {
            from_location: "Delhi".to_string(),
            to_location: "Goa".to_string(),
            departure_date: "2025-09-15".to_string(),
            return_date: return_date.map(str::to_string),
            travelers,
        }
    }

    #[test]
    fn test_price_scales_with_travelers() {
        let search = FlightsTool::new().search(&params(2, None));
        assert_eq!(search.outbound_flights[0].price, "₹9000");
        assert_eq!(search.outbound_flights[1].price, "₹10400");
    }

    #[test]
    fn test_return_flights_only_with_return_date() {
        let tool = FlightsTool::new();
        assert!(tool.search(&params(1, None)).return_flights.is_empty());

        let round_trip = tool.search(&params(3, Some("2025-09-20")));
        assert_eq!(round_trip.return_flights.len(), 1);
        assert_eq!(round_trip.return_flights[0].flight_number, "6E 789");
        assert_eq!(round_trip.return_flights[0].price, "₹14400");
    }

    #[test]
    fn test_search_criteria_serializes_return_key() {
        let value = FlightsTool::new().lookup(&params(1, Some("2025-09-20")));
        assert_eq!(value["search_criteria"]["return"], "2025-09-20");
        assert_eq!(value["summary"], "Found multiple flight options from Delhi to Goa");
    }

    #[tokio::test]
    async fn test_travelers_default_to_one() {
        let value = FlightsTool::new()
            .execute(
                json!({"from_location": "Delhi", "to_location": "Goa", "departure_date": "2025-09-15"}),
                &Validator::SerdeFirst,
            )
            .await
            .unwrap();
        assert_eq!(value["search_criteria"]["travelers"], 1);
        assert_eq!(value["outbound_flights"][0]["price"], "₹4500");
        assert!(value["search_criteria"]["return"].is_null());
    }
}
