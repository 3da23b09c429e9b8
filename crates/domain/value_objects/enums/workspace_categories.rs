use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Category selector of the workspace drill-down list.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WorkspaceCategory {
    #[default]
    All,
    NoSubscription,
    ActiveTrial,
    ExpiredTrial,
    Monthly,
    Yearly,
    Canceled,
}

impl WorkspaceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceCategory::All => "all",
            WorkspaceCategory::NoSubscription => "noSubscription",
            WorkspaceCategory::ActiveTrial => "activeTrial",
            WorkspaceCategory::ExpiredTrial => "expiredTrial",
            WorkspaceCategory::Monthly => "monthly",
            WorkspaceCategory::Yearly => "yearly",
            WorkspaceCategory::Canceled => "canceled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "all" => Some(WorkspaceCategory::All),
            "noSubscription" => Some(WorkspaceCategory::NoSubscription),
            "activeTrial" => Some(WorkspaceCategory::ActiveTrial),
            "expiredTrial" => Some(WorkspaceCategory::ExpiredTrial),
            "monthly" => Some(WorkspaceCategory::Monthly),
            "yearly" => Some(WorkspaceCategory::Yearly),
            "canceled" => Some(WorkspaceCategory::Canceled),
            _ => None,
        }
    }
}

impl Display for WorkspaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
