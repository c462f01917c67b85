//! Dashboard state owned by the runtime.
//!
//! Every producer writes here through one of two doors: the verification
//! flow through [`FlowSurface`](sn_01_verification_flow::FlowSurface) and
//! [`LogSink`](sn_01_verification_flow::LogSink), the feed through the
//! [`FeedConsumer`](crate::consumer::FeedConsumer). A renderer reads a
//! [`DashboardSnapshot`].

mod log_panel;
mod snapshot;
mod state;

pub use log_panel::{LogPanel, LOG_PANEL_CAPACITY};
pub use snapshot::{DashboardSnapshot, TriggerView};
pub use state::{Dashboard, DashboardState, ALERT_CAPACITY, DEMO_DEVICE};
