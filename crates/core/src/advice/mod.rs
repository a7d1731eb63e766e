//! Advisor pipeline: prompt composition, gateway port, fallback mapping.

pub mod composer;
pub mod ports;
pub mod service;

pub use service::AdvisorService;
