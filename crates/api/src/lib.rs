//! # RoutineLog App
//!
//! Application layer - commands, context, and view state.
//!
//! This crate contains:
//! - The command surface a UI calls
//! - Application context (dependency injection)
//! - The explicit view state machine
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod view;

// Re-export for convenience
pub use commands::*;
pub use context::AppContext;
pub use view::{ViewEvent, ViewState};
