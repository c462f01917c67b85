//! Cross-component flows run against the real runtime.

pub mod feed;
pub mod uplink;
pub mod verification;
