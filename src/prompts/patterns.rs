//! Prompt-engineering patterns for travel questions: zero-shot, one-shot,
//! multi-shot, chain-of-thought and prompts assembled from user context.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub fn zero_shot_itinerary(destination: &str, days: u32) -> String {
    format!(
        "You are a travel assistant. Plan a {days}-day itinerary for {destination}. \
Include must-see attractions, recommended restaurants, and transportation tips."
    )
}

pub fn zero_shot_best_time(destination: &str) -> String {
    format!(
        "Recommend the best time to visit {destination}. \
Consider weather, festivals, and tourist crowds."
    )
}

/// One worked itinerary, then the same task for `destination`
pub fn one_shot_itinerary(destination: &str, days: u32) -> String {
    format!(
        "Here's an example of a travel itinerary format:

Example:
City: Rome, Italy
Duration: 2 days
Day 1:
- Morning: Visit Colosseum (2 hours)
- Afternoon: Explore Roman Forum (1.5 hours)
- Evening: Dinner at Trastevere district
Day 2:
- Morning: Vatican Museums and Sistine Chapel (3 hours)
- Afternoon: St. Peter's Basilica (1.5 hours)
- Evening: Sunset walk to Trevi Fountain and Spanish Steps

Now create a similar itinerary for {destination} for {days} days."
    )
}

const PACKING_EXAMPLES: &str = "Here are examples of travel packing lists for different climates:

Example 1:
Destination: Iceland in Winter
Climate: Cold, snowy
Packing List:
- Thermal underwear
- Waterproof boots
- Heavy winter coat
- Wool sweaters
- Gloves and hat
- Camera for Northern Lights

Example 2:
Destination: Thailand in Summer
Climate: Hot, humid, rainy season
Packing List:
- Lightweight, breathable clothing
- Waterproof jacket
- Comfortable walking sandals
- Sunscreen SPF 50+
- Insect repellent
- Quick-dry towel

Example 3:
Destination: California in Spring
Climate: Mild, occasional rain
Packing List:
- Light layers (t-shirts, light sweater)
- Comfortable walking shoes
- Light rain jacket
- Sunglasses
- Casual evening outfit
- Portable phone charger";

/// Three climate examples, then `destination` (e.g. "Dubai in December")
pub fn multi_shot_packing(destination: &str) -> String {
    format!("{PACKING_EXAMPLES}\n\nNow create a similar packing list for {destination}.")
}

const BUDGET_EXAMPLES: &str = "Here are budget breakdowns for different types of travelers:

Budget Backpacker - Southeast Asia (7 days):
- Accommodation: $140 (hostels)
- Food: $105 (street food, local restaurants)
- Transportation: $50 (local buses, trains)
- Activities: $70 (temples, hiking)
- Total: $365

Mid-range Traveler - European Cities (7 days):
- Accommodation: $560 (3-star hotels)
- Food: $350 (mix of restaurants)
- Transportation: $150 (public transport, some taxis)
- Activities: $280 (museums, tours)
- Total: $1,340

Luxury Traveler - Japan (7 days):
- Accommodation: $1,400 (5-star hotels)
- Food: $700 (fine dining, omakase)
- Transportation: $300 (JR Pass, taxis)
- Activities: $500 (private tours, experiences)
- Total: $2,900";

pub fn multi_shot_budget(traveler: &str, destination: &str, days: u32) -> String {
    format!(
        "{BUDGET_EXAMPLES}\n\nNow create a budget breakdown for a {traveler} traveler visiting {destination} for {days} days."
    )
}

const BUDGET_REASONING: &str = "I need to calculate if I can afford a 7-day trip to Japan with a $2000 budget.
Let me think through this step by step:

Step 1: Break down the major expense categories
- Flights: round-trip to Japan
- Accommodation: 7 nights
- Food: 3 meals per day for 7 days
- Transportation: local travel within Japan
- Activities: sightseeing and experiences
- Miscellaneous: shopping, tips, emergency fund

Step 2: Estimate each category
- Flights: $800-1200 (depending on season and departure city)
- Accommodation: $80-150 per night × 7 nights = $560-1050
- Food: $50-80 per day × 7 days = $350-560
- Transportation: JR Pass 7-day = $280, local transport $100 = $380
- Activities: $300-500 for temples, museums, experiences
- Miscellaneous: $200-300

Step 3: Calculate total ranges
- Minimum total: $800 + $560 + $350 + $380 + $300 + $200 = $2590
- Maximum total: $1200 + $1050 + $560 + $380 + $500 + $300 = $3990

Step 4: Compare with budget
- My budget: $2000
- Minimum estimated cost: $2590
- Deficit: $2590 - $2000 = $590

Conclusion: $2000 is not sufficient for a comfortable 7-day Japan trip.
I would need at least $2600 or should consider budget-saving options.";

/// Worked affordability check, then the same question for the given trip
pub fn chain_of_thought_budget(budget: &str, days: u32, destination: &str) -> String {
    format!(
        "{BUDGET_REASONING}\n\nNow analyze if a {budget} budget is sufficient for a {days}-day trip to {destination}.\nShow your step-by-step reasoning."
    )
}

const ITINERARY_REASONING: &str = "Plan the most efficient 3-day itinerary for Rome. Let me work through this systematically:

Step 1: Identify must-see attractions and their locations
- Ancient Rome area: Colosseum, Roman Forum, Palatine Hill
- Vatican area: Vatican Museums, Sistine Chapel, St. Peter's Basilica
- Central Rome: Pantheon, Trevi Fountain, Spanish Steps
- Trastevere: Local neighborhood, restaurants, nightlife

Step 2: Consider opening hours and booking requirements
- Vatican Museums: Need advance booking, closed Sundays (except last Sunday)
- Colosseum: Timed entry tickets, open daily
- Many churches: Closed during lunch hours (12:30-3:30 PM)
- Restaurants: Many closed on Mondays

Step 3: Group attractions by proximity to minimize travel time
- Day 1: Ancient Rome cluster (Colosseum area)
- Day 2: Vatican area (requires full morning)
- Day 3: Central Rome walking tour

Step 4: Consider energy levels and optimal timing
- Morning: High energy activities (major sights)
- Afternoon: Lighter activities after lunch break
- Evening: Dining and relaxation

Step 5: Account for practical factors
- Walking distances between sites
- Metro/bus connections
- Meal timing and restaurant locations
- Rest breaks and photo opportunities

Final optimized itinerary:
Day 1: Colosseum (9 AM) → Roman Forum → Palatine Hill → Lunch in Monti → Pantheon → Trevi Fountain
Day 2: Vatican Museums (8 AM) → Sistine Chapel → St. Peter's Basilica → Lunch → Castel Sant'Angelo → Evening in Borgo
Day 3: Spanish Steps → Villa Borghese → Lunch → Trastevere exploration → Sunset at Gianicolo Hill";

pub fn chain_of_thought_itinerary(destination: &str, days: u32) -> String {
    format!(
        "{ITINERARY_REASONING}\n\nNow plan a similar {days}-day itinerary for {destination} using this step-by-step approach."
    )
}

/// Who is travelling, used to pick guidance lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerProfile {
    /// `backpacker`, `mid-range` or `luxury`
    pub budget: String,
    /// `cultural`, `adventure` or `relaxation`
    pub travel_style: String,
    pub group_size: u32,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Default for TravelerProfile {
    fn default() -> Self {
        Self {
            budget: "mid-range".to_string(),
            travel_style: "cultural".to_string(),
            group_size: 2,
            interests: vec![
                "museums".to_string(),
                "local_food".to_string(),
                "history".to_string(),
            ],
        }
    }
}

fn budget_guidance(budget: &str) -> Option<&'static str> {
    match budget {
        "mid-range" => Some(
            "Budget Level: mid-range - Include moderately priced accommodations and dining options.",
        ),
        "luxury" => Some(
            "Budget Level: luxury - Include high-end hotels, fine dining, and premium experiences.",
        ),
        "backpacker" => Some(
            "Budget Level: budget - Focus on hostels, street food, and free/low-cost activities.",
        ),
        _ => None,
    }
}

fn style_guidance(style: &str) -> Option<&'static str> {
    match style {
        "cultural" => Some(
            "Travel Style: Cultural - Emphasize museums, historical sites, and local traditions.",
        ),
        "adventure" => Some(
            "Travel Style: Adventure - Focus on outdoor activities, hiking, and thrilling experiences.",
        ),
        "relaxation" => Some(
            "Travel Style: Relaxation - Prioritize spas, beaches, and leisurely activities.",
        ),
        _ => None,
    }
}

/// Itinerary prompt whose guidance lines follow the traveler's profile.
/// Unknown budget levels or styles contribute no line.
pub fn dynamic_itinerary_prompt(profile: &TravelerProfile, destination: &str, days: u32) -> String {
    let mut prompt = String::from("Plan a travel itinerary that matches the following preferences:\n\n");

    for line in [
        budget_guidance(&profile.budget),
        style_guidance(&profile.travel_style),
    ]
    .into_iter()
    .flatten()
    {
        prompt.push_str(line);
        prompt.push('\n');
    }

    prompt.push_str(&format!("Group Size: {} people\n", profile.group_size));
    prompt.push_str(&format!(
        "Special Interests: {}\n\n",
        profile.interests.join(", ")
    ));
    prompt.push_str(&format!("Destination: {destination}\nDuration: {days} days\n\n"));
    prompt.push_str("Please provide a detailed itinerary that matches these preferences.");
    prompt
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelHistory {
    #[serde(default)]
    pub previous_destinations: Vec<String>,
    #[serde(default)]
    pub liked_activities: Vec<String>,
    #[serde(default)]
    pub disliked_activities: Vec<String>,
    pub season_preference: String,
}

/// Next-destination recommendation from past trips. Empty lists are omitted.
pub fn contextual_recommendation_prompt(history: &TravelHistory) -> String {
    let mut prompt = String::from("Based on your travel history and preferences:\n\n");

    if !history.previous_destinations.is_empty() {
        prompt.push_str(&format!(
            "You've enjoyed visiting: {}\n",
            history.previous_destinations.join(", ")
        ));
    }
    if !history.liked_activities.is_empty() {
        prompt.push_str(&format!(
            "You particularly enjoyed: {}\n",
            history.liked_activities.join(", ")
        ));
    }
    if !history.disliked_activities.is_empty() {
        prompt.push_str(&format!(
            "You want to avoid: {}\n",
            history.disliked_activities.join(", ")
        ));
    }

    prompt.push_str(&format!(
        "Preferred travel season: {}\n\n",
        history.season_preference
    ));
    prompt.push_str("Recommend your next destination and explain why it matches your preferences.");
    prompt
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub destination: String,
    /// `rainy`, `sunny`, ...
    pub current_weather: String,
    pub temperature: String,
    pub forecast: String,
}

/// Activity suggestions adapted to the current weather. Only rainy and sunny
/// conditions add a recommendation paragraph.
pub fn weather_adaptive_prompt(weather: &WeatherConditions) -> String {
    let mut prompt = format!(
        "Current weather in {}:\nCondition: {}\nTemperature: {}\nForecast: {}\n\n",
        weather.destination, weather.current_weather, weather.temperature, weather.forecast
    );

    match weather.current_weather.to_ascii_lowercase().as_str() {
        "rainy" => {
            prompt.push_str("Given the rainy weather, recommend indoor activities, museums, covered markets, and cozy cafes. ");
            prompt.push_str(
                "Also suggest what to pack and how to make the most of a rainy day in the city.",
            );
        }
        "sunny" => prompt.push_str(
            "With sunny weather, focus on outdoor activities, parks, walking tours, and outdoor dining options.",
        ),
        _ => {}
    }

    prompt
}

/// Named pattern, renderable for any destination from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPattern {
    ZeroShot,
    BestTime,
    OneShot,
    MultiShotPacking,
    MultiShotBudget,
    ChainOfThoughtBudget,
    ChainOfThoughtItinerary,
    Dynamic,
    Contextual,
    WeatherAdaptive,
}

impl PromptPattern {
    pub const ALL: [PromptPattern; 10] = [
        PromptPattern::ZeroShot,
        PromptPattern::BestTime,
        PromptPattern::OneShot,
        PromptPattern::MultiShotPacking,
        PromptPattern::MultiShotBudget,
        PromptPattern::ChainOfThoughtBudget,
        PromptPattern::ChainOfThoughtItinerary,
        PromptPattern::Dynamic,
        PromptPattern::Contextual,
        PromptPattern::WeatherAdaptive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PromptPattern::ZeroShot => "zero-shot",
            PromptPattern::BestTime => "best-time",
            PromptPattern::OneShot => "one-shot",
            PromptPattern::MultiShotPacking => "multi-shot-packing",
            PromptPattern::MultiShotBudget => "multi-shot-budget",
            PromptPattern::ChainOfThoughtBudget => "cot-budget",
            PromptPattern::ChainOfThoughtItinerary => "cot-itinerary",
            PromptPattern::Dynamic => "dynamic",
            PromptPattern::Contextual => "contextual",
            PromptPattern::WeatherAdaptive => "weather",
        }
    }

    /// Render with sample context for `destination` over `days` days
    pub fn render(&self, destination: &str, days: u32) -> String {
        match self {
            PromptPattern::ZeroShot => zero_shot_itinerary(destination, days),
            PromptPattern::BestTime => zero_shot_best_time(destination),
            PromptPattern::OneShot => one_shot_itinerary(destination, days),
            PromptPattern::MultiShotPacking => multi_shot_packing(destination),
            PromptPattern::MultiShotBudget => multi_shot_budget("mid-range", destination, days),
            PromptPattern::ChainOfThoughtBudget => {
                chain_of_thought_budget("$1500", days, destination)
            }
            PromptPattern::ChainOfThoughtItinerary => chain_of_thought_itinerary(destination, days),
            PromptPattern::Dynamic => {
                dynamic_itinerary_prompt(&TravelerProfile::default(), destination, days)
            }
            PromptPattern::Contextual => contextual_recommendation_prompt(&TravelHistory {
                previous_destinations: vec![destination.to_string()],
                liked_activities: vec!["art museums".to_string(), "food tours".to_string()],
                disliked_activities: vec!["crowded beaches".to_string(), "shopping".to_string()],
                season_preference: "spring".to_string(),
            }),
            PromptPattern::WeatherAdaptive => weather_adaptive_prompt(&WeatherConditions {
                destination: destination.to_string(),
                current_weather: "rainy".to_string(),
                temperature: "15°C".to_string(),
                forecast: format!("rain for next {days} days"),
            }),
        }
    }
}

impl fmt::Display for PromptPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PromptPattern {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown prompt pattern '{value}' (expected one of: {})", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_prompt_uses_guidance_tables() {
        let prompt = dynamic_itinerary_prompt(&TravelerProfile::default(), "Prague, Czech Republic", 4);
        assert!(prompt.contains("Budget Level: mid-range - Include moderately priced"));
        assert!(prompt.contains("Travel Style: Cultural"));
        assert!(prompt.contains("Group Size: 2 people"));
        assert!(prompt.contains("Special Interests: museums, local_food, history"));
        assert!(prompt.ends_with("Please provide a detailed itinerary that matches these preferences."));
    }

    #[test]
    fn test_dynamic_prompt_skips_unknown_levels() {
        let profile = TravelerProfile {
            budget: "splurge".to_string(),
            travel_style: "adventure".to_string(),
            group_size: 4,
            interests: Vec::new(),
        };
        let prompt = dynamic_itinerary_prompt(&profile, "Manali", 5);
        assert!(!prompt.contains("Budget Level"));
        assert!(prompt.contains("Travel Style: Adventure"));
    }

    #[test]
    fn test_contextual_prompt_omits_empty_lists() {
        let history = TravelHistory {
            previous_destinations: vec!["Paris".to_string(), "Rome".to_string()],
            season_preference: "spring".to_string(),
            ..TravelHistory::default()
        };
        let prompt = contextual_recommendation_prompt(&history);
        assert!(prompt.contains("You've enjoyed visiting: Paris, Rome"));
        assert!(!prompt.contains("You want to avoid"));
        assert!(prompt.contains("Preferred travel season: spring"));
    }

    #[test]
    fn test_weather_prompt_branches() {
        let mut weather = WeatherConditions {
            destination: "London".to_string(),
            current_weather: "rainy".to_string(),
            temperature: "15°C".to_string(),
            forecast: "rain for next 3 days".to_string(),
        };
        assert!(weather_adaptive_prompt(&weather).contains("indoor activities"));

        weather.current_weather = "sunny".to_string();
        assert!(weather_adaptive_prompt(&weather).contains("outdoor activities"));

        weather.current_weather = "foggy".to_string();
        assert!(weather_adaptive_prompt(&weather).ends_with("Forecast: rain for next 3 days\n\n"));
    }

    #[test]
    fn test_pattern_names_parse() {
        for pattern in PromptPattern::ALL {
            assert_eq!(pattern.name().parse::<PromptPattern>().unwrap(), pattern);
        }
        assert_eq!("COT_BUDGET".parse::<PromptPattern>().unwrap(), PromptPattern::ChainOfThoughtBudget);
        assert!("few-shot".parse::<PromptPattern>().is_err());
    }

    #[test]
    fn test_render_targets_destination() {
        for pattern in PromptPattern::ALL {
            let prompt = pattern.render("Goa", 4);
            assert!(!prompt.is_empty());
            if pattern != PromptPattern::Contextual {
                assert!(prompt.contains("Goa"), "{pattern} does not mention Goa");
            }
        }
    }
}
