//! # Shared Types Crate
//!
//! Domain entities and inbound message types shared by every SHIELD-NET
//! component.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: log entries, threat alerts and the inbound
//!   message shape are defined once here.
//! - **Injectable time and chance**: components never call `tokio::time` or
//!   `rand` directly; they hold a [`Clock`] and a [`RandomSource`] so tests
//!   can drive virtual time and scripted randomness.

pub mod clock;
pub mod entities;
pub mod errors;
pub mod ipc;
pub mod page;
pub mod random;

pub use clock::{Clock, SystemClock};
pub use entities::*;
pub use errors::*;
pub use ipc::*;
pub use page::PageCapabilities;
pub use random::{FixedRandom, RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
