use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schemas::{completion_schema, CompletionSchema, SchemaHandle};

/// Which output contract the prompt declared to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSchema {
    /// Free-form strings: `itinerary`, `packing_list` of strings, `booking_links`, `budget_estimate`, `travel_tips`
    Flat,
    /// Strongly typed: packing items with categories, booking recommendations, `generated_at`
    Typed,
}

impl PlanSchema {
    pub fn schema_version(&self) -> &'static str {
        match self {
            PlanSchema::Flat => "flat",
            PlanSchema::Typed => "typed",
        }
    }

    pub fn handle(&self) -> &'static SchemaHandle {
        match self {
            PlanSchema::Flat => FlatTravelPlan::schema(),
            PlanSchema::Typed => TravelPlan::schema(),
        }
    }
}

impl fmt::Display for PlanSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_version())
    }
}

impl FromStr for PlanSchema {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(PlanSchema::Flat),
            "typed" => Ok(PlanSchema::Typed),
            other => Err(format!("unknown plan schema '{other}' (expected flat or typed)")),
        }
    }
}

/// A parsed plan tagged with the schema it was produced under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "schema_version", rename_all = "snake_case")]
pub enum TravelPlanDocument {
    Flat(FlatTravelPlan),
    Typed(TravelPlan),
}

impl TravelPlanDocument {
    pub fn schema(&self) -> PlanSchema {
        match self {
            TravelPlanDocument::Flat(_) => PlanSchema::Flat,
            TravelPlanDocument::Typed(_) => PlanSchema::Typed,
        }
    }

    pub fn itinerary_days(&self) -> usize {
        match self {
            TravelPlanDocument::Flat(plan) => plan.itinerary.len(),
            TravelPlanDocument::Typed(plan) => plan.itinerary.len(),
        }
    }

    pub fn packing_items(&self) -> Vec<&str> {
        match self {
            TravelPlanDocument::Flat(plan) => {
                plan.packing_list.iter().map(String::as_str).collect()
            }
            TravelPlanDocument::Typed(plan) => {
                plan.packing_list.iter().map(|item| item.item.as_str()).collect()
            }
        }
    }
}

/// Plan shape declared by the function-calling system prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FlatTravelPlan {
    /// Day-by-day itinerary
    pub itinerary: Vec<FlatItineraryDay>,
    /// Items to pack
    #[serde(default)]
    pub packing_list: Vec<String>,
    /// Weather summary for the trip
    #[serde(default)]
    pub weather_forecast: String,
    #[serde(default)]
    pub booking_links: BookingLinks,
    #[serde(default)]
    pub budget_estimate: BudgetEstimate,
    #[serde(default)]
    pub travel_tips: Vec<String>,
}

completion_schema!(FlatTravelPlan, "FlatTravelPlan");

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FlatItineraryDay {
    /// 1-based day counter
    pub day: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default)]
    pub transportation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BookingLinks {
    #[serde(default)]
    pub flights: Option<String>,
    #[serde(default)]
    pub hotels: Option<String>,
}

/// Price ranges per spending category, as free text
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BudgetEstimate {
    #[serde(default)]
    pub flights: Option<String>,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub activities: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

/// Plan shape declared by the structured-output prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TravelPlan {
    /// Destination city and country
    pub destination: String,
    pub travel_dates: TravelDates,
    /// Number of travelers the plan is designed for
    pub total_travelers: u32,
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub packing_list: Vec<PackingItem>,
    #[serde(default)]
    pub booking_recommendations: Vec<BookingRecommendation>,
    #[serde(default)]
    pub weather_summary: String,
    #[serde(default)]
    pub estimated_total_cost: String,
    #[serde(default)]
    pub special_notes: Vec<String>,
    /// ISO-8601 timestamp of generation
    #[serde(default)]
    pub generated_at: String,
}

completion_schema!(TravelPlan, "TravelPlan");

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TravelDates {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryDay {
    pub day: u32,
    pub date: String,
    #[serde(default)]
    pub activities: Vec<String>,
    /// Recommended meals or restaurants
    #[serde(default)]
    pub meals: Vec<String>,
    /// Cost estimate for the day, as free text
    #[serde(default)]
    pub estimated_cost: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PackingItem {
    pub item: String,
    /// clothing, electronics, toiletries, documents, ...
    pub category: String,
    pub essential: bool,
    #[serde(default)]
    pub weather_dependent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookingRecommendation {
    /// flight, hotel or activity
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub price: String,
    pub booking_url: String,
    #[serde(default)]
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_tag_round_trips_schema_version() {
        let doc = TravelPlanDocument::Flat(FlatTravelPlan::default());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["schema_version"], "flat");
        assert_eq!(doc.schema(), PlanSchema::Flat);
    }

    #[test]
    fn test_booking_recommendation_type_field() {
        let rec: BookingRecommendation = serde_json::from_value(json!({
            "type": "hotel",
            "name": "Grand Goa Resort",
            "price": "₹3900",
            "booking_url": "https://www.agoda.com"
        }))
        .unwrap();
        assert_eq!(rec.kind, "hotel");
        assert!(rec.details.is_empty());
    }

    #[test]
    fn test_plan_schema_from_str() {
        assert_eq!("Typed".parse::<PlanSchema>().unwrap(), PlanSchema::Typed);
        assert!("loose".parse::<PlanSchema>().is_err());
    }

    #[test]
    fn test_schema_handles_are_distinct() {
        assert_eq!(PlanSchema::Flat.handle().schema_name(), "FlatTravelPlan");
        assert_eq!(PlanSchema::Typed.handle().schema_name(), "TravelPlan");
        assert!(PlanSchema::Typed.handle().schema_json()["properties"]
            .get("generated_at")
            .is_some());
    }
}
