use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::value_objects::{
    enums::{
        subscription_plans::SubscriptionPlan,
        workspace_subscription_statuses::WorkspaceSubscriptionStatus,
    },
    subscription_status::{classify_workspace, trial_remaining_nanos},
    timestamps::{NANOS_PER_HOUR, Timestamp},
    workspace_snapshots::WorkspaceSubscriptionSnapshot,
};

/// Active trials with at most this much time left count as expiring.
pub const EXPIRING_TRIAL_WINDOW_NANOS: i64 = 48 * NANOS_PER_HOUR;

/// Fleet-wide subscription summary for the analytics dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionAnalytics {
    pub total_workspaces: u64,
    pub free_trial_count: u64,
    pub expiring_free_trial_count: u64,
    pub expired_free_trial_count: u64,
    pub monthly_count: u64,
    pub yearly_count: u64,
    pub canceled_count: u64,
    pub empty_subscriptions_count: u64,
    pub monthly_percent: f64,
    pub yearly_percent: f64,
    pub workspaces_expiring_free_trials: Vec<WorkspaceSubscriptionSnapshot>,
    pub subscription_details: Vec<WorkspaceSubscriptionSnapshot>,
}

impl SubscriptionAnalytics {
    pub fn paid_count(&self) -> u64 {
        self.monthly_count + self.yearly_count
    }

    /// Share of workspaces on a paid plan, in percent.
    pub fn conversion_rate(&self) -> f64 {
        percent_of(self.paid_count(), self.total_workspaces)
    }
}

/// Folds per-workspace snapshots into fleet counts in a single pass.
///
/// Buckets are re-derived from each snapshot's record so they always agree with
/// [`resolve_subscription_status`](super::subscription_status::resolve_subscription_status).
/// The detail lists keep the input order and carry the derived status.
pub fn aggregate_subscription_analytics(
    snapshots: &[WorkspaceSubscriptionSnapshot],
    now: Timestamp,
) -> SubscriptionAnalytics {
    let mut analytics = SubscriptionAnalytics {
        total_workspaces: snapshots.len() as u64,
        subscription_details: Vec::with_capacity(snapshots.len()),
        ..Default::default()
    };

    for snapshot in snapshots {
        let record = snapshot.subscription();
        let status = classify_workspace(record.as_ref(), now);

        if status != snapshot.status {
            warn!(
                owner = %snapshot.owner,
                reported = %snapshot.status,
                derived = %status,
                "subscription_analytics: snapshot status disagrees with its record, using derived"
            );
        }

        let mut detail = snapshot.clone();
        detail.status = status;

        match status {
            WorkspaceSubscriptionStatus::NoSubscription => {
                analytics.empty_subscriptions_count += 1;
            }
            WorkspaceSubscriptionStatus::ActiveTrial => {
                analytics.free_trial_count += 1;

                let expiring = record
                    .as_ref()
                    .and_then(|record| trial_remaining_nanos(record, now))
                    .is_some_and(|remaining| remaining <= EXPIRING_TRIAL_WINDOW_NANOS);
                if expiring {
                    analytics.expiring_free_trial_count += 1;
                    analytics.workspaces_expiring_free_trials.push(detail.clone());
                }
            }
            WorkspaceSubscriptionStatus::ExpiredTrial => {
                analytics.free_trial_count += 1;
                analytics.expired_free_trial_count += 1;
            }
            WorkspaceSubscriptionStatus::Paid => match detail.plan {
                Some(SubscriptionPlan::Monthly) => analytics.monthly_count += 1,
                Some(SubscriptionPlan::Yearly) => analytics.yearly_count += 1,
                other => {
                    warn!(
                        owner = %snapshot.owner,
                        plan = ?other,
                        "subscription_analytics: paid bucket without a paid plan, not counted"
                    );
                }
            },
            WorkspaceSubscriptionStatus::Canceled => {
                analytics.canceled_count += 1;
            }
        }

        analytics.subscription_details.push(detail);
    }

    analytics.monthly_percent = percent_of(analytics.monthly_count, analytics.total_workspaces);
    analytics.yearly_percent = percent_of(analytics.yearly_count, analytics.total_workspaces);

    debug!(
        total_workspaces = analytics.total_workspaces,
        free_trials = analytics.free_trial_count,
        expiring_free_trials = analytics.expiring_free_trial_count,
        paid = analytics.paid_count(),
        canceled = analytics.canceled_count,
        "subscription_analytics: fleet aggregated"
    );

    analytics
}

fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}
