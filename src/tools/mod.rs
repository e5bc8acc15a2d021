//! Mock travel data providers, the function table and the dispatcher

pub mod attractions;
pub mod dispatcher;
pub mod flights;
pub mod hotels;
pub mod tool;
pub mod weather;

pub use attractions::AttractionsTool;
pub use dispatcher::FunctionDispatcher;
pub use flights::FlightsTool;
pub use hotels::{BudgetCategory, HotelsTool};
pub use tool::{Tool, ToolFuture, ToolRegistry, TravelFunction};
pub use weather::WeatherTool;
