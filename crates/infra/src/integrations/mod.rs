//! External service integrations

pub mod openai;

pub use openai::OpenAiClient;
