//! Subscription plan levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plan stored in `profiles.subscription_plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Default plan for every new profile.
    #[default]
    Free,

    /// Paid plan unlocked by a Creem checkout.
    ProPlus,
}

impl SubscriptionPlan {
    /// Column value as stored by the profile table.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::ProPlus => "pro_plus",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionPlan::ProPlus)
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
