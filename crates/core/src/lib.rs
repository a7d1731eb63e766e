//! # RoutineLog Core
//!
//! Business logic for RoutineLog: record validation and orchestration,
//! on-demand statistics aggregation, prompt composition, and the advisor
//! service that turns gateway failures into tagged fallback outcomes.
//!
//! ## Architecture
//! - Depends on `routinelog-domain` only
//! - Declares the ports (`RecordRepository`, `AdvisorGateway`) that
//!   `routinelog-infra` implements
//! - All aggregation is pure; nothing here touches a database or the network

pub mod advice;
pub mod records;
pub mod stats;

pub use advice::ports::AdvisorGateway;
pub use advice::AdvisorService;
pub use records::ports::RecordRepository;
pub use records::RecordService;
