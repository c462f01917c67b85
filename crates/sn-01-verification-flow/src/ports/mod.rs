//! Ports module for the Verification Flow
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::VerificationFlowApi;
pub use outbound::{FlowSurface, LogSink, Navigator, StepVerifier};
