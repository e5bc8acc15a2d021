pub mod assistant;
pub(crate) mod conversation;
pub mod function_call;
pub mod observer;
pub mod steps;

pub use crate::types::result::{PlanOutcome, TokenUsage};
pub use assistant::TravelAssistant;
pub use function_call::{FunctionCall, FunctionExecution, FunctionResult};
pub use observer::{NoopObserver, PlanObserver, RecordingObserver, TracingObserver};
pub use steps::PlanStep;
