pub mod subscription_analytics;
pub mod subscriptions;
