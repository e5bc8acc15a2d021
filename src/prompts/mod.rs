//! Prompt text for the travel assistant.
//!
//! Everything here is plain string assembly: missing fields are replaced with
//! placeholder text and no builder can fail.

pub mod patterns;

use serde_json::Value;

use crate::types::trip_request::TripRequest;

pub use patterns::PromptPattern;

pub const NO_PREFERENCES: &str = "No specific preferences";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_REQUIREMENTS: &str = "None";
pub const GENERAL_TOURISM: &str = "General tourism";
pub const CHECK_WEATHER: &str = "Please check weather forecast";

/// System instruction for the function-calling assistant. Declares the flat
/// plan schema.
pub const SYSTEM_PROMPT: &str = r#"You are a Smart Travel Assistant, an AI-powered travel planning expert that helps users create personalized trip itineraries, packing lists, and booking recommendations.

Your core capabilities include:
1. **Trip Planning**: Generate detailed day-by-day itineraries based on user preferences
2. **Packing Lists**: Create personalized packing recommendations based on destination, weather, and activities
3. **Live Data Integration**: Use function calling to fetch real-time weather, flight availability, and hotel options
4. **Location Expertise**: Leverage your knowledge base to provide location-specific tips and recommendations
5. **Structured Output**: Always return responses in the specified JSON format for seamless UI integration

**Function Calling Guidelines:**
You have access to the following functions that you MUST use when appropriate:
- `getWeather(location, dates)`: Get real-time weather forecasts for planning
- `getFlights(from_location, to_location, departure_date, return_date, travelers)`: Check flight availability and pricing
- `getHotels(destination, check_in, check_out, travelers, budget_category)`: Find accommodation options
- `getAttractions(destination, preferences, trip_duration)`: Get location-specific attractions and activities

**Response Format Requirements:**
ALWAYS return your response as valid JSON with this exact structure:
{
    "itinerary": [
        {
            "day": 1,
            "date": "YYYY-MM-DD",
            "activities": ["Activity 1", "Activity 2"],
            "meals": ["Breakfast location", "Lunch location", "Dinner location"],
            "transportation": "Transportation method"
        }
    ],
    "packing_list": ["Item 1", "Item 2", "Item 3"],
    "weather_forecast": "Weather summary for the trip",
    "booking_links": {
        "flights": "Flight booking URL or recommendation",
        "hotels": "Hotel booking URL or recommendation"
    },
    "budget_estimate": {
        "flights": "Price range",
        "accommodation": "Price range",
        "food": "Price range",
        "activities": "Price range",
        "total": "Total estimated cost"
    },
    "travel_tips": ["Tip 1", "Tip 2", "Tip 3"]
}

**Personality and Tone:**
- Be enthusiastic and helpful about travel planning
- Provide practical, actionable advice
- Consider cultural sensitivities and local customs
- Balance popular attractions with hidden gems
- Be mindful of budget constraints when specified
- Prioritize safety and current travel advisories

**Quality Guidelines:**
- Use real place names and specific recommendations
- Consider seasonal factors and local events
- Balance structured activities with free time
- Account for travel time between locations
- Suggest alternatives for different weather conditions
- Include local cuisine and cultural experiences"#;

/// Trip-planning request for the function-calling assistant.
///
/// `additional_context` replaces the request's own context when given (used
/// for retrieved knowledge).
pub fn user_prompt(request: &TripRequest, additional_context: Option<&str>) -> String {
    let context = additional_context.unwrap_or(request.additional_context.as_str());

    format!(
        "Plan a personalized trip based on the following details:

**Trip Details:**
- From: {from}
- Destination: {destination}
- Travel Dates: {start} to {end}
- Number of Travelers: {travelers}
- Travel Preferences: {preferences}
- Budget Range: {budget} (if specified)
- Special Requirements: {requirements}

**Additional Context:**
{context}

Please create a comprehensive travel plan that includes:
1. A detailed day-by-day itinerary
2. A personalized packing list
3. Weather considerations
4. Booking recommendations
5. Budget estimates
6. Local travel tips

Use function calling to get real-time data for weather, flights, and accommodations. Ensure all recommendations are practical and current.",
        from = request.origin,
        destination = request.destination,
        start = request.start_date,
        end = request.end_date,
        travelers = request.travelers,
        preferences = join_or(&request.preferences, NO_PREFERENCES),
        budget = non_empty_or(request.budget.as_deref(), NOT_SPECIFIED),
        requirements = non_empty_or(request.special_requirements.as_deref(), NO_REQUIREMENTS),
    )
}

/// Packing-list request. The trip window is the first and last of `dates`.
pub fn packing_prompt(
    destination: &str,
    dates: &[String],
    activities: &[String],
    weather: Option<&Value>,
) -> String {
    let first = dates.first().map(String::as_str).unwrap_or(NOT_SPECIFIED);
    let last = dates.last().map(String::as_str).unwrap_or(NOT_SPECIFIED);
    let weather_info = match weather {
        Some(data) if !data.is_null() => format!("Weather forecast: {data}"),
        _ => CHECK_WEATHER.to_string(),
    };

    format!(
        "Create a comprehensive packing list for a trip to {destination} from {first} to {last}.

**Trip Context:**
- Destination: {destination}
- Activities planned: {activities}
- {weather_info}

Consider:
- Climate and weather conditions
- Cultural dress codes and customs
- Activity-specific gear and clothing
- Essential documents and travel items
- Electronics and charging needs
- Health and safety items

Return the packing list as part of a structured JSON response.",
        activities = join_or(activities, GENERAL_TOURISM),
    )
}

/// Wraps retrieved knowledge so it can be passed as additional context
pub fn rag_context_prompt(retrieved_context: &str) -> String {
    format!(
        "Use the following travel knowledge to enhance your recommendations:

**Retrieved Travel Information:**
{retrieved_context}

**Instructions:**
- Incorporate relevant information from the above context into your travel plan
- Prioritize factual information from the knowledge base
- Combine the retrieved information with real-time data from function calls
- Ensure recommendations are current and accurate
- If information conflicts, prefer real-time data over stored knowledge"
    )
}

const TYPED_PLAN_SHAPE: &str = r#"{
  "destination": "string - destination city/country",
  "travel_dates": {
    "start_date": "string - YYYY-MM-DD format",
    "end_date": "string - YYYY-MM-DD format"
  },
  "total_travelers": "integer - number of travelers",
  "itinerary": [
    {
      "day": "integer - day number",
      "date": "string - YYYY-MM-DD format",
      "activities": ["string - list of activities"],
      "meals": ["string - recommended meals/restaurants"],
      "estimated_cost": "string - cost estimate for the day",
      "notes": "string - additional notes or tips"
    }
  ],
  "packing_list": [
    {
      "item": "string - item name",
      "category": "string - clothing/electronics/toiletries/documents/etc",
      "essential": "boolean - true if essential",
      "weather_dependent": "boolean - true if depends on weather"
    }
  ],
  "booking_recommendations": [
    {
      "type": "string - flight/hotel/activity",
      "name": "string - name of service/place",
      "price": "string - price range or estimate",
      "booking_url": "string - example booking URL",
      "details": "string - additional details"
    }
  ],
  "weather_summary": "string - weather forecast summary",
  "estimated_total_cost": "string - total trip cost estimate",
  "special_notes": ["string - list of important notes or tips"],
  "generated_at": "string - ISO timestamp"
}"#;

/// Single-turn prompt declaring the typed plan schema. `generated_at` is the
/// timestamp the model is told to echo back.
pub fn structured_plan_prompt(request: &TripRequest, generated_at: &str) -> String {
    let mut prompt = format!(
        "
You are a travel planning AI assistant. Create a comprehensive travel plan based on the user's requirements.

User Request:
- From: {from}
- Destination: {destination}
- Start Date: {start}
- End Date: {end}
- Travelers: {travelers}
- Preferences: {preferences}
- Budget: {budget}
- Special Requirements: {requirements}
",
        from = non_empty_or(Some(request.origin.as_str()), NOT_SPECIFIED),
        destination = non_empty_or(Some(request.destination.as_str()), NOT_SPECIFIED),
        start = non_empty_or(Some(request.start_date.as_str()), NOT_SPECIFIED),
        end = non_empty_or(Some(request.end_date.as_str()), NOT_SPECIFIED),
        travelers = request.travelers,
        preferences = request.preferences.join(", "),
        budget = non_empty_or(request.budget.as_deref(), NOT_SPECIFIED),
        requirements = non_empty_or(request.special_requirements.as_deref(), NO_REQUIREMENTS),
    );

    if !request.additional_context.trim().is_empty() {
        prompt.push_str(&format!("- Additional Context: {}\n", request.additional_context));
    }

    prompt.push_str(&format!(
        "
IMPORTANT: You MUST respond with ONLY a valid JSON object that exactly matches this schema:

{TYPED_PLAN_SHAPE}

Requirements:
1. Generate a realistic day-by-day itinerary for the specified dates
2. Include a practical packing list with proper categorization
3. Provide realistic booking recommendations with example URLs
4. Include weather considerations for the destination and dates
5. Provide cost estimates in the local currency or USD
6. Add helpful tips and special notes
7. Set generated_at to the current ISO timestamp: {generated_at}
8. Do NOT include any text outside the JSON response
9. Ensure all JSON fields are properly formatted and escape special characters

Respond with only the JSON object:"
    ));

    prompt
}

fn join_or(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.join(", ")
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => placeholder,
    }
}
