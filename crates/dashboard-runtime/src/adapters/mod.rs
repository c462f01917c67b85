//! Runtime implementations of the verification flow's outbound ports.

mod metered;
mod navigator;

pub use metered::MeteredVerifier;
pub use navigator::DashboardNavigator;
