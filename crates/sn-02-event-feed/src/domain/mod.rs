//! Domain layer for the Event Feed

pub mod catalog;
pub mod errors;
