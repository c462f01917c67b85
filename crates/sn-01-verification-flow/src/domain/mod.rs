//! Domain module for the Verification Flow
//!
//! Contains step definitions, state machines, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
