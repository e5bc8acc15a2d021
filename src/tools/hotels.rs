use std::fmt;

use super::tool::{unavailable, Tool, ToolFuture, TravelFunction};
use crate::schemas::{validator::lenient_u32, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Accommodation price tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetCategory {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl BudgetCategory {
    /// Unrecognised categories fall back to mid-range
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "budget" => BudgetCategory::Budget,
            "luxury" => BudgetCategory::Luxury,
            _ => BudgetCategory::MidRange,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Budget => "budget",
            BudgetCategory::MidRange => "mid-range",
            BudgetCategory::Luxury => "luxury",
        }
    }

    /// Nightly price range in rupees
    pub fn price_range(&self) -> (u32, u32) {
        match self {
            BudgetCategory::Budget => (1500, 3000),
            BudgetCategory::MidRange => (3000, 8000),
            BudgetCategory::Luxury => (8000, 25000),
        }
    }

    pub fn base_price(&self) -> u32 {
        self.price_range().0
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for hotel searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelParams {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default = "default_travelers", deserialize_with = "lenient_u32")]
    pub travelers: u32,
    #[serde(default)]
    pub budget_category: Option<String>,
}

fn default_travelers() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelCriteria {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    pub travelers: u32,
    /// Category as the caller asked for it
    pub budget_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub name: String,
    pub category: String,
    pub rating: f64,
    pub price_per_night: String,
    pub amenities: Vec<String>,
    pub location: String,
    pub booking_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearch {
    pub search_criteria: HotelCriteria,
    pub hotels: Vec<HotelOffer>,
    pub summary: String,
}

/// Hotel search provider priced from a fixed category table
#[derive(Debug, Clone, Default)]
pub struct HotelsTool;

impl HotelsTool {
    pub fn new() -> Self {
        Self
    }

    pub fn search(&self, params: &HotelParams) -> HotelSearch {
        // Only pricing falls back to mid-range; the requested label is echoed.
        let category = params
            .budget_category
            .clone()
            .unwrap_or_else(|| BudgetCategory::default().to_string());
        let base = BudgetCategory::parse_lenient(&category).base_price();
        // 30% premium, rounded to the nearest rupee
        let resort_price = (u64::from(base) * 13 + 5) / 10;
        let destination = &params.destination;

        let hotels = vec![
            HotelOffer {
                name: format!("Hotel Paradise {destination}"),
                category: category.clone(),
                rating: 4.2,
                price_per_night: format!("₹{base}"),
                amenities: strings(&["Free WiFi", "Swimming Pool", "Restaurant", "Room Service"]),
                location: format!("Central {destination}"),
                booking_url: "https://www.booking.com".to_string(),
            },
            HotelOffer {
                name: format!("Grand {destination} Resort"),
                category: category.clone(),
                rating: 4.5,
                price_per_night: format!("₹{resort_price}"),
                amenities: strings(&["Spa", "Beach Access", "Multiple Restaurants", "Gym"]),
                location: format!("Beach Area, {destination}"),
                booking_url: "https://www.agoda.com".to_string(),
            },
        ];

        HotelSearch {
            search_criteria: HotelCriteria {
                destination: destination.clone(),
                check_in: params.check_in.clone(),
                check_out: params.check_out.clone(),
                travelers: params.travelers,
                budget_category: category.clone(),
            },
            hotels,
            summary: format!(
                "Found {category} hotels in {destination} starting from ₹{base} per night"
            ),
        }
    }

    pub fn lookup(&self, params: &HotelParams) -> Value {
        serde_json::to_value(self.search(params)).unwrap_or_else(|_| unavailable("hotel"))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl Tool for HotelsTool {
    fn function(&self) -> TravelFunction {
        TravelFunction::GetHotels
    }

    fn description(&self) -> &'static str {
        "Find hotel and accommodation options with pricing and availability"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": {
                    "type": "string",
                    "description": "Destination city or location for accommodation search"
                },
                "check_in": {
                    "type": "string",
                    "description": "Check-in date in YYYY-MM-DD format"
                },
                "check_out": {
                    "type": "string",
                    "description": "Check-out date in YYYY-MM-DD format"
                },
                "travelers": {
                    "type": "integer",
                    "description": "Number of travelers requiring accommodation"
                },
                "budget_category": {
                    "type": "string",
                    "enum": ["budget", "mid-range", "luxury"],
                    "description": "Budget preference category for accommodation"
                }
            },
            "required": ["destination", "check_in", "check_out"]
        })
    }

    fn execute<'a>(&'a self, arguments: Value, validator: &'a Validator) -> ToolFuture<'a> {
        Box::pin(async move {
            let params: HotelParams = validator.validate(self.name(), arguments)?;
            Ok(self.lookup(&params))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(category: Option<&str>) -> HotelParams {
        HotelParams {
            destination: "Goa".to_string(),
            check_in: "2025-09-15".to_string(),
            check_out: "2025-09-20".to_string(),
            travelers: 2,
            budget_category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_base_prices_per_category() {
        let tool = HotelsTool::new();
        for (category, base, resort) in [
            ("budget", "₹1500", "₹1950"),
            ("mid-range", "₹3000", "₹3900"),
            ("luxury", "₹8000", "₹10400"),
        ] {
            let search = tool.search(&params(Some(category)));
            assert_eq!(search.hotels[0].price_per_night, base);
            assert_eq!(search.hotels[1].price_per_night, resort);
        }
    }

    #[test]
    fn test_unknown_category_priced_as_mid_range_but_echoed() {
        let search = HotelsTool::new().search(&params(Some("premium")));
        assert_eq!(search.search_criteria.budget_category, "premium");
        assert_eq!(search.hotels[0].category, "premium");
        assert_eq!(search.hotels[0].price_per_night, "₹3000");
        assert_eq!(search.hotels[1].price_per_night, "₹3900");
        assert_eq!(
            search.summary,
            "Found premium hotels in Goa starting from ₹3000 per night"
        );

        let search = HotelsTool::new().search(&params(None));
        assert_eq!(
            search.summary,
            "Found mid-range hotels in Goa starting from ₹3000 per night"
        );
    }

    #[test]
    fn test_offer_names_and_serialized_category() {
        let value = HotelsTool::new().lookup(&params(Some("luxury")));
        assert_eq!(value["hotels"][0]["name"], "Hotel Paradise Goa");
        assert_eq!(value["hotels"][1]["name"], "Grand Goa Resort");
        assert_eq!(value["hotels"][1]["location"], "Beach Area, Goa");
        assert_eq!(value["hotels"][0]["category"], "luxury");
        assert_eq!(value["search_criteria"]["budget_category"], "luxury");
    }
}
