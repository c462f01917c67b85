//! # SN-01: Verification Flow
//!
//! Drives the four-step "secure handshake" shown on the dashboard: each step
//! is marked active, does its simulated work, is marked verified, and logs a
//! pending/success pair; afterwards the flow grants clearance and navigates
//! to the secure lobby.
//!
//! ## Architecture
//!
//! - **Domain**: step definitions, step/flow state machines, invariants
//! - **Ports**: Inbound (`VerificationFlowApi`) and Outbound (`FlowSurface`,
//!   `LogSink`, `Navigator`, `StepVerifier`)
//! - **Application**: `VerificationFlowService` sequencing the run
//! - **Adapters**: simulated and fault-injecting step verifiers
//!
//! ## State Machine
//!
//! ```text
//! Idle ──start()──→ Running(1..4) ──→ Completed ──→ Redirected
//!                        │
//!                        └──step failed──→ Aborted ──start()──→ Running(resume)
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{FaultInjectingVerifier, SimulatedStepVerifier};
pub use application::service::VerificationFlowService;
pub use config::FlowConfig;
pub use domain::entities::*;
pub use domain::errors::{FlowError, NavigationError};
pub use ports::inbound::VerificationFlowApi;
pub use ports::outbound::{FlowSurface, LogSink, Navigator, StepVerifier};
