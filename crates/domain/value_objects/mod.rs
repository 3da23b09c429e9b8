pub mod enums;
pub mod plan_assignment;
pub mod subscription_analytics;
pub mod subscription_status;
pub mod subscriptions;
pub mod timestamps;
pub mod workspace_filters;
pub mod workspace_snapshots;
