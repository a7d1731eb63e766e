//! Record management: port definition and validating service.

pub mod ports;
pub mod service;

pub use service::RecordService;
