//! # Adapters Layer (Hexagonal Architecture)
//!
//! Step verifier implementations.

mod fault_injection;
mod simulated;

pub use fault_injection::FaultInjectingVerifier;
pub use simulated::SimulatedStepVerifier;
