//! trip-agent-rs: a Gemini function-calling travel assistant
//!
//! The assistant plans trips by letting Gemini call four mock travel data
//! providers (weather, flights, hotels and attractions) before it writes a
//! JSON itinerary. It also generates packing lists and ships a catalogue of
//! prompt-engineering patterns.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_agent_rs::{AssistantConfig, TravelAssistant, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("GEMINI_API_KEY")?;
//!     let assistant = TravelAssistant::new(AssistantConfig::new(api_key))?;
//!
//!     let request = TripRequest::new("Delhi", "Goa", "2025-09-15", "2025-09-20")
//!         .with_travelers(2)
//!         .with_preferences(["beach", "culture"])
//!         .with_budget("mid-range");
//!
//!     let outcome = assistant.plan_trip(&request, None).await;
//!     println!("{}", serde_json::to_string_pretty(&outcome.response)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod prompts;
pub mod schemas;
pub mod services;
pub mod tools;
pub mod types;

pub use config::{AssistantConfig, GenerationSettings};
pub use self::core::{
    FunctionCall, FunctionResult, NoopObserver, PlanObserver, PlanOutcome, PlanStep,
    RecordingObserver, TokenUsage, TracingObserver, TravelAssistant,
};
pub use error::{AssistantError, Result};
pub use prompts::PromptPattern;
pub use schemas::{CompletionSchema, SchemaHandle, StrictValidator, Validator};
pub use services::{GeminiClient, ModelBackend};
pub use tools::{FunctionDispatcher, Tool, ToolRegistry, TravelFunction};
pub use types::{
    deserialize_structured_response, FlatTravelPlan, PlanSchema, TravelPlan, TravelPlanDocument,
    TripRequest,
};

pub use self::core as assistant;
pub use types::gemini;

#[cfg(feature = "cli")]
pub mod cli;
