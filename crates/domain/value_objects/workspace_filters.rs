use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::{
        subscription_plans::SubscriptionPlan, workspace_categories::WorkspaceCategory,
        workspace_subscription_statuses::WorkspaceSubscriptionStatus,
    },
    workspace_snapshots::WorkspaceSubscriptionSnapshot,
};

/// Search text AND category selector over the analytics detail list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: WorkspaceCategory,
}

impl WorkspaceFilter {
    pub fn new(search: impl Into<String>, category: WorkspaceCategory) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn matches(&self, workspace: &WorkspaceSubscriptionSnapshot) -> bool {
        self.matches_search(workspace) && self.matches_category(workspace)
    }

    /// Keeps matching workspaces in their original order.
    pub fn apply<'a, I>(&self, workspaces: I) -> Vec<WorkspaceSubscriptionSnapshot>
    where
        I: IntoIterator<Item = &'a WorkspaceSubscriptionSnapshot>,
    {
        workspaces
            .into_iter()
            .filter(|workspace| self.matches(workspace))
            .cloned()
            .collect()
    }

    fn matches_search(&self, workspace: &WorkspaceSubscriptionSnapshot) -> bool {
        let query = self.search.trim();
        if query.is_empty() {
            return true;
        }
        workspace
            .business_name
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    fn matches_category(&self, workspace: &WorkspaceSubscriptionSnapshot) -> bool {
        match self.category {
            WorkspaceCategory::All => true,
            WorkspaceCategory::NoSubscription => {
                workspace.status == WorkspaceSubscriptionStatus::NoSubscription
            }
            WorkspaceCategory::ActiveTrial => {
                workspace.status == WorkspaceSubscriptionStatus::ActiveTrial
            }
            WorkspaceCategory::ExpiredTrial => {
                workspace.status == WorkspaceSubscriptionStatus::ExpiredTrial
            }
            WorkspaceCategory::Monthly => workspace.plan == Some(SubscriptionPlan::Monthly),
            WorkspaceCategory::Yearly => workspace.plan == Some(SubscriptionPlan::Yearly),
            WorkspaceCategory::Canceled => workspace.status == WorkspaceSubscriptionStatus::Canceled,
        }
    }
}
