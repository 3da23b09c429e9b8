use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{subscriptions::SubscriptionRecord, workspaces::BusinessWorkspace},
    value_objects::{
        enums::{
            subscription_plans::SubscriptionPlan,
            workspace_subscription_statuses::WorkspaceSubscriptionStatus,
        },
        subscription_status::classify_workspace,
        timestamps::Timestamp,
    },
};

/// Read-only view of one workspace's subscription at aggregation time.
///
/// `plan` and `start_date` are `None` for workspaces that never subscribed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSubscriptionSnapshot {
    pub owner: String,
    pub business_name: String,
    #[serde(default)]
    pub plan: Option<SubscriptionPlan>,
    pub status: WorkspaceSubscriptionStatus,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub canceled_at: Option<Timestamp>,
}

impl WorkspaceSubscriptionSnapshot {
    pub fn capture(workspace: &BusinessWorkspace, now: Timestamp) -> Self {
        let subscription = workspace.subscription.as_ref();

        Self {
            owner: workspace.owner.clone(),
            business_name: workspace.business_name.clone(),
            plan: subscription.map(|record| record.plan),
            status: classify_workspace(subscription, now),
            start_date: subscription.map(|record| record.start_date),
            end_date: subscription.and_then(|record| record.end_date),
            canceled_at: subscription.and_then(|record| record.canceled_at),
        }
    }

    /// The record this snapshot was taken from, if the workspace has one.
    pub fn subscription(&self) -> Option<SubscriptionRecord> {
        match (self.plan, self.start_date) {
            (Some(plan), Some(start_date)) => Some(SubscriptionRecord {
                plan,
                start_date,
                end_date: self.end_date,
                canceled_at: self.canceled_at,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::timestamps::NANOS_PER_DAY;

    #[test]
    fn capture_derives_status_from_the_record() {
        let start = Timestamp::from_nanos(100 * NANOS_PER_DAY);
        let workspace = BusinessWorkspace::new("owner-1", "Acme Corp").with_subscription(
            SubscriptionRecord {
                plan: SubscriptionPlan::FreeTrial,
                start_date: start,
                end_date: Some(start.saturating_add_days(7)),
                canceled_at: None,
            },
        );

        let snapshot = WorkspaceSubscriptionSnapshot::capture(&workspace, start.saturating_add_days(8));

        assert_eq!(snapshot.status, WorkspaceSubscriptionStatus::ExpiredTrial);
        assert_eq!(snapshot.plan, Some(SubscriptionPlan::FreeTrial));
        assert_eq!(snapshot.subscription(), workspace.subscription);
    }

    #[test]
    fn capture_without_subscription_has_no_record() {
        let workspace = BusinessWorkspace::new("owner-2", "Other Co");
        let snapshot = WorkspaceSubscriptionSnapshot::capture(&workspace, Timestamp::from_nanos(0));

        assert_eq!(snapshot.status, WorkspaceSubscriptionStatus::NoSubscription);
        assert_eq!(snapshot.plan, None);
        assert_eq!(snapshot.subscription(), None);
    }
}
