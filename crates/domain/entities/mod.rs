pub mod subscriptions;
pub mod workspaces;
