use std::collections::BTreeMap;

use super::tool::{unavailable, Tool, ToolFuture, TravelFunction};
use crate::schemas::{validator::lenient_u32, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CATEGORIES: [(&str, [&str; 3]); 6] = [
    ("beach", ["Baga Beach", "Calangute Beach", "Anjuna Beach"]),
    (
        "culture",
        ["Old Goa Churches", "Goa State Museum", "Fontainhas Latin Quarter"],
    ),
    (
        "adventure",
        ["Water Sports at Baga", "Scuba Diving", "Parasailing"],
    ),
    (
        "food",
        ["Thalassa Restaurant", "Fisherman's Wharf", "Local Fish Markets"],
    ),
    ("nightlife", ["Club Cubana", "Tito's", "Casino Palms"]),
    (
        "shopping",
        ["Anjuna Flea Market", "Mapusa Market", "Panaji Shopping"],
    ),
];

/// Always recommended, after the preference matches
const UNIVERSAL: [&str; 2] = ["Fort Aguada", "Dudhsagar Falls"];

const PER_CATEGORY: usize = 2;
const PER_DAY: usize = 2;

/// Parameters for attraction lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionParams {
    pub destination: String,
    pub preferences: Vec<String>,
    #[serde(default = "default_trip_duration", deserialize_with = "lenient_u32")]
    pub trip_duration: u32,
}

fn default_trip_duration() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionGuide {
    pub destination: String,
    pub preferences: Vec<String>,
    pub recommended_attractions: Vec<String>,
    /// `day_1`, `day_2`, ... to two attractions each
    pub day_wise_suggestions: BTreeMap<String, Vec<String>>,
    pub summary: String,
}

/// Attraction provider backed by a fixed category table
#[derive(Debug, Clone, Default)]
pub struct AttractionsTool;

impl AttractionsTool {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(&self, params: &AttractionParams) -> AttractionGuide {
        let mut all: Vec<String> = Vec::new();
        for preference in &params.preferences {
            let key = preference.to_lowercase();
            if let Some((_, names)) = CATEGORIES.iter().find(|(category, _)| *category == key) {
                all.extend(names.iter().take(PER_CATEGORY).map(|name| name.to_string()));
            }
        }
        all.extend(UNIVERSAL.iter().map(|name| name.to_string()));

        let duration = params.trip_duration as usize;
        let recommended = all
            .iter()
            .take(duration.saturating_mul(PER_DAY))
            .cloned()
            .collect();

        let days = duration.min(all.len() / PER_DAY);
        let day_wise_suggestions = all
            .chunks(PER_DAY)
            .take(days)
            .enumerate()
            .map(|(idx, chunk)| (format!("day_{}", idx + 1), chunk.to_vec()))
            .collect();

        AttractionGuide {
            destination: params.destination.clone(),
            preferences: params.preferences.clone(),
            recommended_attractions: recommended,
            day_wise_suggestions,
            summary: format!(
                "Found {} attractions matching your preferences in {}",
                all.len(),
                params.destination
            ),
        }
    }

    pub fn lookup(&self, params: &AttractionParams) -> Value {
        serde_json::to_value(self.recommend(params)).unwrap_or_else(|_| unavailable("attractions"))
    }
}

impl Tool for AttractionsTool {
    fn function(&self) -> TravelFunction {
        TravelFunction::GetAttractions
    }

    fn description(&self) -> &'static str {
        "Get popular attractions, activities, and points of interest for a destination"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": {
                    "type": "string",
                    "description": "Destination city or location to search attractions for"
                },
                "preferences": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "User preferences like 'beach', 'culture', 'adventure', 'food', 'nightlife', 'shopping'"
                },
                "trip_duration": {
                    "type": "integer",
                    "description": "Number of days for the trip to tailor recommendations"
                }
            },
            "required": ["destination", "preferences"]
        })
    }

    fn execute<'a>(&'a self, arguments: Value, validator: &'a Validator) -> ToolFuture<'a> {
        Box::pin(async move {
            let params: AttractionParams = validator.validate(self.name(), arguments)?;
            Ok(self.lookup(&params))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(preferences: &[&str], trip_duration: u32) -> AttractionParams {
        AttractionParams {
            destination: "Goa".to_string(),
            preferences: preferences.iter().map(|p| p.to_string()).collect(),
            trip_duration,
        }
    }

    #[test]
    fn test_truncates_to_two_per_day() {
        let guide = AttractionsTool::new().recommend(&params(&["beach", "food"], 2));
        assert_eq!(
            guide.recommended_attractions,
            vec![
                "Baga Beach",
                "Calangute Beach",
                "Thalassa Restaurant",
                "Fisherman's Wharf"
            ]
        );
        assert_eq!(
            guide.summary,
            "Found 6 attractions matching your preferences in Goa"
        );
        assert_eq!(guide.day_wise_suggestions.len(), 2);
        assert_eq!(
            guide.day_wise_suggestions["day_2"],
            vec!["Thalassa Restaurant", "Fisherman's Wharf"]
        );
    }

    #[test]
    fn test_preferences_match_case_insensitively() {
        let guide = AttractionsTool::new().recommend(&params(&["Beach", "museums"], 3));
        assert_eq!(
            guide.recommended_attractions,
            vec!["Baga Beach", "Calangute Beach", "Fort Aguada", "Dudhsagar Falls"]
        );
    }

    #[test]
    fn test_day_buckets_limited_by_available_attractions() {
        let guide = AttractionsTool::new().recommend(&params(&[], 5));
        assert_eq!(guide.recommended_attractions.len(), 2);
        assert_eq!(guide.day_wise_suggestions.len(), 1);
        assert_eq!(
            guide.day_wise_suggestions["day_1"],
            vec!["Fort Aguada", "Dudhsagar Falls"]
        );
    }

    #[test]
    fn test_zero_duration_yields_no_recommendations() {
        let guide = AttractionsTool::new().recommend(&params(&["culture"], 0));
        assert!(guide.recommended_attractions.is_empty());
        assert!(guide.day_wise_suggestions.is_empty());
    }
}
