use crate::axum_http::{auth::AuthUser, error_responses::AppError};
use crate::usecases::subscription_analytics::SubscriptionAnalyticsUseCase;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use subscriptions_core::{
    domain::{
        repositories::workspaces::WorkspaceRepository,
        value_objects::{
            enums::workspace_categories::WorkspaceCategory,
            timestamps::{Clock, SystemClock},
            workspace_filters::WorkspaceFilter,
        },
    },
    infra::store::{
        json_store_connection::JsonStoreSquad, repositories::workspaces::WorkspaceJsonStore,
    },
};
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct WorkspacesQuery {
    search: Option<String>,
    category: Option<String>,
}

pub fn routes(store: Arc<JsonStoreSquad>) -> Router {
    let workspace_repository = WorkspaceJsonStore::new(Arc::clone(&store));
    let usecase =
        SubscriptionAnalyticsUseCase::new(Arc::new(workspace_repository), Arc::new(SystemClock));

    Router::new()
        .route("/", get(subscription_analytics))
        .route("/workspaces", get(list_workspaces))
        .route("/is-admin", get(is_caller_admin))
        .with_state(Arc::new(usecase))
}

fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if auth.is_admin() {
        return Ok(());
    }
    warn!(owner = %auth.owner, role = ?auth.role, "subscription_analytics: non-admin caller rejected");
    Err(AppError::Forbidden(
        "Only admins can view subscription analytics".to_string(),
    ))
}

/// Lets the dashboard decide whether to render analytics before requesting them.
pub async fn is_caller_admin(auth: AuthUser) -> impl IntoResponse {
    Json(auth.is_admin())
}

pub async fn subscription_analytics<W, C>(
    State(usecase): State<Arc<SubscriptionAnalyticsUseCase<W, C>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    if let Err(err) = require_admin(&auth) {
        return err.into_response();
    }
    info!(owner = %auth.owner, "subscription_analytics: analytics request received");

    match usecase.get_subscription_analytics().await {
        Ok(analytics) => Json(analytics).into_response(),
        Err(err) => {
            error!(error = ?err, "subscription_analytics: failed to compute analytics");
            AppError::Internal(err).into_response()
        }
    }
}

pub async fn list_workspaces<W, C>(
    State(usecase): State<Arc<SubscriptionAnalyticsUseCase<W, C>>>,
    auth: AuthUser,
    Query(query): Query<WorkspacesQuery>,
) -> impl IntoResponse
where
    W: WorkspaceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    if let Err(err) = require_admin(&auth) {
        return err.into_response();
    }

    let category = match query.category.as_deref() {
        None | Some("") => WorkspaceCategory::All,
        Some(raw) => match WorkspaceCategory::from_str(raw) {
            Some(category) => category,
            None => {
                return AppError::BadRequest(format!("unknown category filter: {raw}"))
                    .into_response();
            }
        },
    };
    let filter = WorkspaceFilter::new(query.search.unwrap_or_default(), category);
    info!(
        owner = %auth.owner,
        search = %filter.search,
        category = %filter.category,
        "subscription_analytics: workspace list request received"
    );

    match usecase.list_workspaces(&filter).await {
        Ok(workspaces) => Json(workspaces).into_response(),
        Err(err) => {
            error!(error = ?err, "subscription_analytics: failed to list workspaces");
            AppError::Internal(err).into_response()
        }
    }
}
