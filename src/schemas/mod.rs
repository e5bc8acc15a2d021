//! JSON schema handles for plan types plus validation of plans and function arguments.

pub mod schema;
pub mod validation;
pub mod validator;

pub(crate) use schema::completion_schema;
pub use schema::{CompletionSchema, SchemaHandle};
pub use validator::{StrictValidator, Validator};
