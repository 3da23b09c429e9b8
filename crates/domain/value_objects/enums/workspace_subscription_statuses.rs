use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Analytics bucket of a workspace. Every workspace lands in exactly one.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum WorkspaceSubscriptionStatus {
    #[default]
    NoSubscription,
    ActiveTrial,
    ExpiredTrial,
    Paid,
    Canceled,
}

impl WorkspaceSubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceSubscriptionStatus::NoSubscription => "noSubscription",
            WorkspaceSubscriptionStatus::ActiveTrial => "activeTrial",
            WorkspaceSubscriptionStatus::ExpiredTrial => "expiredTrial",
            WorkspaceSubscriptionStatus::Paid => "paid",
            WorkspaceSubscriptionStatus::Canceled => "canceled",
        }
    }

    /// Badge text shown next to a workspace in the analytics table.
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceSubscriptionStatus::NoSubscription => "No Subscription",
            WorkspaceSubscriptionStatus::ActiveTrial => "Active Trial",
            WorkspaceSubscriptionStatus::ExpiredTrial => "Expired Trial",
            WorkspaceSubscriptionStatus::Paid => "Paid",
            WorkspaceSubscriptionStatus::Canceled => "Canceled",
        }
    }
}

impl Display for WorkspaceSubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
