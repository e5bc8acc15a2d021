use std::{collections::BTreeMap, fmt, future::Future, pin::Pin, str::FromStr};

use serde_json::Value;

use crate::{error::AssistantError, schemas::Validator, types::gemini::FunctionDeclaration};

/// Boxed future returned by [`Tool::execute`]
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, AssistantError>> + Send + 'a>>;

/// The fixed set of operations the model is allowed to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TravelFunction {
    GetWeather,
    GetFlights,
    GetHotels,
    GetAttractions,
}

impl TravelFunction {
    pub const ALL: [TravelFunction; 4] = [
        TravelFunction::GetWeather,
        TravelFunction::GetFlights,
        TravelFunction::GetHotels,
        TravelFunction::GetAttractions,
    ];

    /// Wire name used in function declarations and calls
    pub fn name(&self) -> &'static str {
        match self {
            TravelFunction::GetWeather => "getWeather",
            TravelFunction::GetFlights => "getFlights",
            TravelFunction::GetHotels => "getHotels",
            TravelFunction::GetAttractions => "getAttractions",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.name() == name)
    }
}

impl fmt::Display for TravelFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TravelFunction {
    type Err = AssistantError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| AssistantError::ToolNotFound(name.to_string()))
    }
}

/// A data provider the model can call through function calling
pub trait Tool: Send + Sync + fmt::Debug {
    /// Which entry of the function table this tool serves
    fn function(&self) -> TravelFunction;

    /// A description of what the tool does
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's parameters
    fn parameters_schema(&self) -> Value;

    /// Validate `arguments` with `validator`, then run the lookup
    fn execute<'a>(&'a self, arguments: Value, validator: &'a Validator) -> ToolFuture<'a>;

    fn name(&self) -> &'static str {
        self.function().name()
    }

    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Registry for the available tools, one per [`TravelFunction`]
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<TravelFunction, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool already serving the same function
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.function(), Box::new(tool));
    }

    pub fn get(&self, function: TravelFunction) -> Option<&dyn Tool> {
        self.tools.get(&function).map(|tool| tool.as_ref())
    }

    /// Tools in function-table order
    pub fn list(&self) -> Vec<&dyn Tool> {
        self.tools.values().map(|tool| tool.as_ref()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Declarations sent to the model in the `tools` field
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.tools.values().map(|tool| tool.declaration()).collect()
    }
}

/// Payload returned by a provider that could not produce its data
pub(crate) fn unavailable(kind: &str) -> Value {
    let mut title = kind.to_string();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    serde_json::json!({
        "error": format!("Unable to fetch {kind} data"),
        "summary": format!("{title} information unavailable"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names_round_trip() {
        for function in TravelFunction::ALL {
            assert_eq!(TravelFunction::from_name(function.name()), Some(function));
        }
        assert_eq!(TravelFunction::from_name("getTrains"), None);
        assert!("getweather".parse::<TravelFunction>().is_err());
    }

    #[test]
    fn test_unavailable_payload() {
        let payload = unavailable("hotel");
        assert_eq!(payload["error"], "Unable to fetch hotel data");
        assert_eq!(payload["summary"], "Hotel information unavailable");
    }
}
