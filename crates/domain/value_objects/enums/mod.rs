pub mod subscription_plans;
pub mod workspace_categories;
pub mod workspace_subscription_statuses;
