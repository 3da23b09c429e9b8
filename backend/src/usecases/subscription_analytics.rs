use std::sync::Arc;

use anyhow::Result;
use subscriptions_core::domain::{
    repositories::workspaces::WorkspaceRepository,
    value_objects::{
        subscription_analytics::{SubscriptionAnalytics, aggregate_subscription_analytics},
        timestamps::{Clock, Timestamp},
        workspace_filters::WorkspaceFilter,
        workspace_snapshots::WorkspaceSubscriptionSnapshot,
    },
};
use tracing::{error, info};

/// Fleet-wide views for the analytics dashboard. Callers are expected to be authorized already.
pub struct SubscriptionAnalyticsUseCase<W, C>
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    workspace_repo: Arc<W>,
    clock: Arc<C>,
}

impl<W, C> SubscriptionAnalyticsUseCase<W, C>
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(workspace_repo: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            workspace_repo,
            clock,
        }
    }

    pub async fn get_subscription_analytics(&self) -> Result<SubscriptionAnalytics> {
        let now = self.clock.now();
        let snapshots = self.capture_snapshots(now).await?;

        let analytics = aggregate_subscription_analytics(&snapshots, now);
        info!(
            total_workspaces = analytics.total_workspaces,
            expiring_free_trials = analytics.expiring_free_trial_count,
            "subscription_analytics: analytics computed"
        );

        Ok(analytics)
    }

    /// Drill-down list narrowed by search text and category, in business-name order.
    pub async fn list_workspaces(
        &self,
        filter: &WorkspaceFilter,
    ) -> Result<Vec<WorkspaceSubscriptionSnapshot>> {
        let now = self.clock.now();
        let snapshots = self.capture_snapshots(now).await?;
        let analytics = aggregate_subscription_analytics(&snapshots, now);

        let workspaces = filter.apply(&analytics.subscription_details);
        info!(
            search = %filter.search,
            category = %filter.category,
            matched = workspaces.len(),
            total = analytics.total_workspaces,
            "subscription_analytics: workspaces filtered"
        );

        Ok(workspaces)
    }

    async fn capture_snapshots(&self, now: Timestamp) -> Result<Vec<WorkspaceSubscriptionSnapshot>> {
        let workspaces = self
            .workspace_repo
            .list_sorted_by_business_name()
            .await
            .inspect_err(|err| {
                error!(store_error = ?err, "subscription_analytics: failed to list workspaces");
            })?;

        Ok(workspaces
            .iter()
            .map(|workspace| WorkspaceSubscriptionSnapshot::capture(workspace, now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subscriptions_core::domain::{
        entities::{subscriptions::SubscriptionRecord, workspaces::BusinessWorkspace},
        repositories::workspaces::MockWorkspaceRepository,
        value_objects::{
            enums::{
                subscription_plans::SubscriptionPlan, workspace_categories::WorkspaceCategory,
                workspace_subscription_statuses::WorkspaceSubscriptionStatus,
            },
            timestamps::{MockClock, NANOS_PER_DAY, NANOS_PER_HOUR},
        },
    };

    const NOW: Timestamp = Timestamp::from_nanos(19_500 * NANOS_PER_DAY);

    fn fixed_clock() -> Arc<MockClock> {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(NOW);
        Arc::new(clock)
    }

    fn on_plan(name: &str, plan: SubscriptionPlan) -> BusinessWorkspace {
        BusinessWorkspace::new(format!("owner-{name}"), name).with_subscription(SubscriptionRecord {
            plan,
            start_date: Timestamp::from_nanos(NOW.as_nanos() - 30 * NANOS_PER_DAY),
            end_date: None,
            canceled_at: None,
        })
    }

    fn trial_ending_in(name: &str, nanos: i64) -> BusinessWorkspace {
        let end_date = NOW.saturating_add_nanos(nanos);
        BusinessWorkspace::new(format!("owner-{name}"), name).with_subscription(SubscriptionRecord {
            plan: SubscriptionPlan::FreeTrial,
            start_date: Timestamp::from_nanos(end_date.as_nanos() - 7 * NANOS_PER_DAY),
            end_date: Some(end_date),
            canceled_at: None,
        })
    }

    fn fleet() -> Vec<BusinessWorkspace> {
        vec![
            on_plan("Acme Corp", SubscriptionPlan::Monthly),
            trial_ending_in("Acme Labs", 36 * NANOS_PER_HOUR),
            BusinessWorkspace::new("owner-empty", "Empty Shop"),
            trial_ending_in("Late Co", -2 * NANOS_PER_DAY),
            on_plan("Other Co", SubscriptionPlan::Yearly),
        ]
    }

    fn repo_with(workspaces: Vec<BusinessWorkspace>) -> Arc<MockWorkspaceRepository> {
        let mut repo = MockWorkspaceRepository::new();
        repo.expect_list_sorted_by_business_name().returning(move || {
            let workspaces = workspaces.clone();
            Box::pin(async move { Ok(workspaces) })
        });
        Arc::new(repo)
    }

    #[tokio::test]
    async fn analytics_cover_the_whole_fleet() {
        let usecase = SubscriptionAnalyticsUseCase::new(repo_with(fleet()), fixed_clock());

        let analytics = usecase.get_subscription_analytics().await.unwrap();

        assert_eq!(analytics.total_workspaces, 5);
        assert_eq!(analytics.monthly_count, 1);
        assert_eq!(analytics.yearly_count, 1);
        assert_eq!(analytics.free_trial_count, 2);
        assert_eq!(analytics.expiring_free_trial_count, 1);
        assert_eq!(analytics.expired_free_trial_count, 1);
        assert_eq!(analytics.empty_subscriptions_count, 1);
        assert_eq!(analytics.monthly_percent, 20.0);
        assert_eq!(
            analytics.workspaces_expiring_free_trials[0].business_name,
            "Acme Labs"
        );
    }

    #[tokio::test]
    async fn listing_applies_search_and_category() {
        let usecase = SubscriptionAnalyticsUseCase::new(repo_with(fleet()), fixed_clock());

        let acme = usecase
            .list_workspaces(&WorkspaceFilter::new("ACME", WorkspaceCategory::All))
            .await
            .unwrap();
        assert_eq!(acme.len(), 2);

        let expired = usecase
            .list_workspaces(&WorkspaceFilter::new("", WorkspaceCategory::ExpiredTrial))
            .await
            .unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].business_name, "Late Co");
        assert_eq!(expired[0].status, WorkspaceSubscriptionStatus::ExpiredTrial);
    }

    #[tokio::test]
    async fn empty_fleet_is_not_an_error() {
        let usecase = SubscriptionAnalyticsUseCase::new(repo_with(Vec::new()), fixed_clock());

        let analytics = usecase.get_subscription_analytics().await.unwrap();

        assert_eq!(analytics.total_workspaces, 0);
        assert_eq!(analytics.monthly_percent, 0.0);
        assert!(analytics.subscription_details.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let mut repo = MockWorkspaceRepository::new();
        repo.expect_list_sorted_by_business_name()
            .returning(|| Box::pin(async { Err(anyhow::anyhow!("backend unavailable")) }));

        let usecase = SubscriptionAnalyticsUseCase::new(Arc::new(repo), fixed_clock());

        assert!(usecase.get_subscription_analytics().await.is_err());
    }
}
