pub mod gemini;
pub mod response;
pub mod result;
pub mod travel_plan;
pub mod trip_request;

pub use response::{deserialize_structured_response, parse_plan_document};
pub use result::{PlanOutcome, TokenUsage};
pub use travel_plan::{FlatTravelPlan, PlanSchema, TravelPlan, TravelPlanDocument};
pub use trip_request::TripRequest;
