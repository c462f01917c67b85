//! Application layer: flow orchestration.

pub mod service;

pub use service::VerificationFlowService;
