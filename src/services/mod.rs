//! Gemini transport, reply interpretation and the planning loop

pub mod backend;
pub mod execution;
pub(crate) mod function_call_utils;
pub mod gemini_client;
pub(crate) mod response_handler;

pub use backend::ModelBackend;
pub use gemini_client::GeminiClient;
