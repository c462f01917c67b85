//! # SHIELD-NET Dashboard Runtime
//!
//! Hosts the dashboard state and wires the two components into it.
//!
//! ## Modular Structure
//!
//! - `dashboard/` - state behind one mutex, log panel, snapshots
//! - `consumer` - applies bus events to the dashboard
//! - `adapters/` - navigator and metered verifier for the flow
//! - `preferences` / `login` / `devices` - persisted theme and role,
//!   cosmetic login, admin device control
//! - `runtime` - builds and owns everything
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `SN_*` variables)
//! 2. Build the dashboard and the verification flow
//! 3. Subscribe the feed consumer to the bus
//! 4. Start the feed producers the page has widgets for

pub mod adapters;
pub mod config;
pub mod consumer;
pub mod dashboard;
pub mod devices;
pub mod login;
pub mod preferences;
pub mod runtime;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use runtime::DashboardRuntime;
