use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    entities::subscriptions::SubscriptionRecord,
    value_objects::{
        enums::{
            subscription_plans::SubscriptionPlan,
            workspace_subscription_statuses::WorkspaceSubscriptionStatus,
        },
        timestamps::{Timestamp, ceil_days},
    },
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionLabel {
    #[serde(rename = "Free Trial")]
    FreeTrial,
    Monthly,
    Yearly,
    Canceled,
    Unknown,
}

impl SubscriptionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionLabel::FreeTrial => "Free Trial",
            SubscriptionLabel::Monthly => "Monthly",
            SubscriptionLabel::Yearly => "Yearly",
            SubscriptionLabel::Canceled => "Canceled",
            SubscriptionLabel::Unknown => "Unknown",
        }
    }
}

impl Display for SubscriptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of a single subscription. Derived on every request, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub label: SubscriptionLabel,
    pub is_expired: bool,
    /// Only set for trials that carry an end date.
    pub days_remaining: Option<u64>,
    pub can_cancel: bool,
}

pub fn resolve_subscription_status(record: &SubscriptionRecord, now: Timestamp) -> SubscriptionStatus {
    match record.plan {
        SubscriptionPlan::FreeTrial => match trial_remaining_nanos(record, now) {
            Some(remaining) => {
                let is_expired = remaining <= 0;
                SubscriptionStatus {
                    label: SubscriptionLabel::FreeTrial,
                    is_expired,
                    days_remaining: Some(ceil_days(remaining)),
                    can_cancel: !is_expired,
                }
            }
            None => SubscriptionStatus {
                label: SubscriptionLabel::FreeTrial,
                is_expired: false,
                days_remaining: None,
                can_cancel: true,
            },
        },
        SubscriptionPlan::Monthly => paid_status(SubscriptionLabel::Monthly),
        SubscriptionPlan::Yearly => paid_status(SubscriptionLabel::Yearly),
        SubscriptionPlan::Canceled => SubscriptionStatus {
            label: SubscriptionLabel::Canceled,
            is_expired: true,
            days_remaining: None,
            can_cancel: false,
        },
        SubscriptionPlan::Unrecognized => {
            warn!(
                start_date = %record.start_date,
                "subscription_status: unrecognized plan, reporting Unknown"
            );
            SubscriptionStatus {
                label: SubscriptionLabel::Unknown,
                is_expired: false,
                days_remaining: None,
                can_cancel: false,
            }
        }
    }
}

// Paid plans never expire here; billing periods are enforced by the workspace backend.
fn paid_status(label: SubscriptionLabel) -> SubscriptionStatus {
    SubscriptionStatus {
        label,
        is_expired: false,
        days_remaining: None,
        can_cancel: true,
    }
}

/// Nanoseconds left on a trial, negative once it has ended. `None` for other plans and for
/// trials without an end date.
pub fn trial_remaining_nanos(record: &SubscriptionRecord, now: Timestamp) -> Option<i64> {
    match (record.plan, record.end_date) {
        (SubscriptionPlan::FreeTrial, Some(end_date)) => Some(now.nanos_until(end_date)),
        _ => None,
    }
}

/// Buckets a workspace for analytics using the same rules as [`resolve_subscription_status`].
pub fn classify_workspace(
    record: Option<&SubscriptionRecord>,
    now: Timestamp,
) -> WorkspaceSubscriptionStatus {
    let Some(record) = record else {
        return WorkspaceSubscriptionStatus::NoSubscription;
    };

    match record.plan {
        SubscriptionPlan::FreeTrial => {
            if resolve_subscription_status(record, now).is_expired {
                WorkspaceSubscriptionStatus::ExpiredTrial
            } else {
                WorkspaceSubscriptionStatus::ActiveTrial
            }
        }
        SubscriptionPlan::Monthly | SubscriptionPlan::Yearly => WorkspaceSubscriptionStatus::Paid,
        SubscriptionPlan::Canceled => WorkspaceSubscriptionStatus::Canceled,
        SubscriptionPlan::Unrecognized => {
            warn!(
                start_date = %record.start_date,
                "subscription_status: unrecognized plan bucketed as noSubscription"
            );
            WorkspaceSubscriptionStatus::NoSubscription
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::timestamps::{NANOS_PER_DAY, NANOS_PER_HOUR};

    const T: Timestamp = Timestamp::from_nanos(1_700_000_000 * 1_000_000_000);

    fn at(days: i64, hours: i64) -> Timestamp {
        T.saturating_add_nanos(days * NANOS_PER_DAY + hours * NANOS_PER_HOUR)
    }

    fn trial(end_date: Option<Timestamp>) -> SubscriptionRecord {
        SubscriptionRecord {
            plan: SubscriptionPlan::FreeTrial,
            start_date: T,
            end_date,
            canceled_at: None,
        }
    }

    fn plan(plan: SubscriptionPlan) -> SubscriptionRecord {
        SubscriptionRecord {
            plan,
            start_date: T,
            end_date: None,
            canceled_at: None,
        }
    }

    #[test]
    fn trial_with_hours_left_reports_one_day() {
        let status = resolve_subscription_status(&trial(Some(at(7, 0))), at(6, 13));

        assert_eq!(status.label, SubscriptionLabel::FreeTrial);
        assert!(!status.is_expired);
        assert_eq!(status.days_remaining, Some(1));
        assert!(status.can_cancel);
    }

    #[test]
    fn trial_past_its_end_is_expired_with_zero_days() {
        let status = resolve_subscription_status(&trial(Some(at(7, 0))), at(9, 0));

        assert!(status.is_expired);
        assert_eq!(status.days_remaining, Some(0));
        assert!(!status.can_cancel);
    }

    #[test]
    fn trial_expires_exactly_at_its_end_date() {
        let end = at(7, 0);

        let status = resolve_subscription_status(&trial(Some(end)), end);
        assert!(status.is_expired);
        assert_eq!(status.days_remaining, Some(0));

        let one_before = Timestamp::from_nanos(end.as_nanos() - 1);
        let status = resolve_subscription_status(&trial(Some(end)), one_before);
        assert!(!status.is_expired);
        assert_eq!(status.days_remaining, Some(1));
    }

    #[test]
    fn future_trials_always_have_at_least_one_day() {
        for offset in [1, NANOS_PER_HOUR, NANOS_PER_DAY, 6 * NANOS_PER_DAY + 1] {
            let now = T;
            let end = now.saturating_add_nanos(offset);
            let status = resolve_subscription_status(&trial(Some(end)), now);
            assert!(!status.is_expired, "offset {offset}");
            assert!(status.days_remaining.unwrap() >= 1, "offset {offset}");
        }
    }

    #[test]
    fn full_trial_counts_whole_days() {
        let status = resolve_subscription_status(&trial(Some(at(7, 0))), T);
        assert_eq!(status.days_remaining, Some(7));
    }

    #[test]
    fn open_ended_trial_is_active_without_countdown() {
        let status = resolve_subscription_status(&trial(None), at(400, 0));

        assert!(!status.is_expired);
        assert_eq!(status.days_remaining, None);
        assert!(status.can_cancel);
    }

    #[test]
    fn paid_plans_never_expire() {
        for (paid, label) in [
            (SubscriptionPlan::Monthly, SubscriptionLabel::Monthly),
            (SubscriptionPlan::Yearly, SubscriptionLabel::Yearly),
        ] {
            let mut record = plan(paid);
            record.end_date = Some(at(1, 0));

            let status = resolve_subscription_status(&record, at(900, 0));
            assert_eq!(status.label, label);
            assert!(!status.is_expired);
            assert!(status.can_cancel);
            assert_eq!(status.days_remaining, None);
        }
    }

    #[test]
    fn canceled_plan_is_expired_and_final() {
        let mut record = plan(SubscriptionPlan::Canceled);
        record.canceled_at = Some(at(2, 0));

        let status = resolve_subscription_status(&record, at(3, 0));
        assert_eq!(status.label, SubscriptionLabel::Canceled);
        assert!(status.is_expired);
        assert!(!status.can_cancel);
        assert_eq!(status.days_remaining, None);
    }

    #[test]
    fn unrecognized_plan_reports_unknown() {
        let status = resolve_subscription_status(&plan(SubscriptionPlan::Unrecognized), T);

        assert_eq!(status.label, SubscriptionLabel::Unknown);
        assert!(!status.is_expired);
        assert!(!status.can_cancel);
        assert_eq!(status.days_remaining, None);
    }

    #[test]
    fn status_serializes_with_display_labels() {
        let status = resolve_subscription_status(&trial(Some(at(7, 0))), T);
        assert_eq!(
            serde_json::to_value(status).unwrap(),
            serde_json::json!({
                "label": "Free Trial",
                "isExpired": false,
                "daysRemaining": 7,
                "canCancel": true
            })
        );
    }

    #[test]
    fn classification_follows_resolver() {
        assert_eq!(
            classify_workspace(None, T),
            WorkspaceSubscriptionStatus::NoSubscription
        );
        assert_eq!(
            classify_workspace(Some(&trial(Some(at(7, 0)))), at(6, 13)),
            WorkspaceSubscriptionStatus::ActiveTrial
        );
        assert_eq!(
            classify_workspace(Some(&trial(Some(at(7, 0)))), at(9, 0)),
            WorkspaceSubscriptionStatus::ExpiredTrial
        );
        assert_eq!(
            classify_workspace(Some(&plan(SubscriptionPlan::Yearly)), T),
            WorkspaceSubscriptionStatus::Paid
        );
        assert_eq!(
            classify_workspace(Some(&plan(SubscriptionPlan::Canceled)), T),
            WorkspaceSubscriptionStatus::Canceled
        );
        assert_eq!(
            classify_workspace(Some(&plan(SubscriptionPlan::Unrecognized)), T),
            WorkspaceSubscriptionStatus::NoSubscription
        );
    }
}
