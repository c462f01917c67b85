//! # Login
//!
//! Cosmetic access check. One hard-coded pair grants headquarters access;
//! any other non-empty pair is a field agent.

use crate::preferences::{PreferencesError, PreferencesStore, UserRole};
use shared_types::Clock;
use sn_01_verification_flow::{NavigationError, Navigator};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DASHBOARD_PAGE: &str = "dashboard.html";

const HQ_USERNAME: &str = "admin";
const HQ_PASSWORD: &str = "Nikhil";

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please enter valid credentials.")]
    EmptyCredentials,

    #[error(transparent)]
    Preferences(#[from] PreferencesError),

    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
}

pub struct LoginService {
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    delay: Duration,
}

impl LoginService {
    pub fn new(clock: Arc<dyn Clock>, navigator: Arc<dyn Navigator>, delay: Duration) -> Self {
        Self {
            clock,
            navigator,
            delay,
        }
    }

    /// Role for a credential pair, or `None` when either half is blank.
    pub fn role_for(username: &str, password: &str) -> Option<UserRole> {
        let (username, password) = (username.trim(), password.trim());
        if username == HQ_USERNAME && password == HQ_PASSWORD {
            Some(UserRole::Headquarters)
        } else if !username.is_empty() && !password.is_empty() {
            Some(UserRole::FieldAgent)
        } else {
            None
        }
    }

    /// Wait out the authentication delay, reset the stored role, then store
    /// the new one and move to the dashboard.
    pub async fn login(
        &self,
        prefs: &mut PreferencesStore,
        username: &str,
        password: &str,
    ) -> Result<UserRole, LoginError> {
        self.clock.sleep(self.delay).await;
        prefs.clear_role()?;

        let role = Self::role_for(username, password).ok_or(LoginError::EmptyCredentials)?;
        prefs.set_role(role)?;
        info!(role = %role, "Login successful");

        self.navigator.navigate(DASHBOARD_PAGE).await?;
        Ok(role)
    }
}
