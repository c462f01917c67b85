//! # Clock
//!
//! Every delay and timestamp in the dashboard goes through [`Clock`].
//! [`SystemClock`] delegates to `tokio::time`, so tests that run under a
//! paused runtime (`#[tokio::test(start_paused = true)]`) advance virtual
//! time deterministically instead of racing real timers.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::time::Duration;

/// Source of wall-clock time and suspension points.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> DateTime<Local>;

    /// Suspend the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer wheel and the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
