//! OpenAI integration for routine advice
//!
//! Implements the `AdvisorGateway` port over the OpenAI Chat Completions
//! API. One request per invocation, bearer auth, JSON-only responses parsed
//! into the typed advisor contracts.
//!
//! # Architecture
//!
//! - **Client**: `OpenAiClient` - HTTP wrapper around the chat-completions
//!   endpoint
//! - **Types**: Request/response wire types and `OpenAiError`
//! - **Prompts**: JSON-schema system instructions per advisor operation
//!
//! # Error Handling
//!
//! Errors surface as typed domain errors; the core advisor service maps
//! them to schema-conformant fallback responses. A missing API key is
//! reported as a configuration error without touching the network.

pub mod client;
pub mod types;

pub use client::OpenAiClient;
pub use types::OpenAiError;
