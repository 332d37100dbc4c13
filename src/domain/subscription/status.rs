//! Subscription status values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status stored in `profiles.subscription_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and current.
    Active,

    /// Never paid, or payment lapsed or failed.
    #[default]
    Inactive,

    /// Customer cancelled the subscription at the provider.
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    /// Maps the provider's raw status on a deactivation event.
    ///
    /// Only an exact `"cancelled"` is kept as a cancellation; every other
    /// value, including a missing one, means the subscription lapsed.
    pub fn from_deactivation(raw_status: Option<&str>) -> Self {
        match raw_status {
            Some("cancelled") => SubscriptionStatus::Cancelled,
            _ => SubscriptionStatus::Inactive,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
