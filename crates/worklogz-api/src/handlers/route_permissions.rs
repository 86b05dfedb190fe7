// ============================================================================
// Worklogz API - Route Permission Handlers
// File: crates/worklogz-api/src/handlers/route_permissions.rs
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use tracing::info;

use worklogz_core::dto::{BulkRoutesQuery, PermissionsMapBody, RoutesBody, UpdatedBody};
use worklogz_core::RouteRule;
use worklogz_core::repositories::RoutePermissionStore;
use worklogz_shared::utils::split_user_ids;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn check_rules(rules: &[RouteRule]) -> Result<(), ApiError> {
    for rule in rules {
        if !rule.path.starts_with('/') {
            return Err(ApiError::Validation(format!(
                "Route path must start with '/': {}",
                rule.path
            )));
        }
        if rule.methods.is_empty() {
            return Err(ApiError::Validation(format!("Route {} has no methods", rule.path)));
        }
    }
    Ok(())
}

/// GET /api/route-permissions/{user_id}
pub async fn get_routes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<RoutesBody> {
    let routes = state.route_store.fetch_routes(&user_id).await?;
    Ok(Json(ApiResponse::success(RoutesBody { routes })))
}

/// PUT /api/route-permissions/{user_id}
pub async fn update_routes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<RoutesBody>, JsonRejection>,
) -> ApiResult<RoutesBody> {
    let Json(request) = body?;
    check_rules(&request.routes)?;

    let routes = state.route_store.store_routes(&user_id, request.routes).await?;

    info!("Route permissions updated for {} ({} rules)", user_id, routes.len());
    Ok(Json(ApiResponse::success(RoutesBody { routes })))
}

/// GET /api/route-permissions/bulk?userIds=a,b
pub async fn get_bulk_routes(
    State(state): State<AppState>,
    query: Result<Query<BulkRoutesQuery>, QueryRejection>,
) -> ApiResult<PermissionsMapBody> {
    let Query(query) = query?;
    let user_ids = split_user_ids(&query.user_ids);
    let permissions_map = state.route_store.fetch_many(&user_ids).await?;
    Ok(Json(ApiResponse::success(PermissionsMapBody { permissions_map })))
}

/// PUT /api/route-permissions/bulk
pub async fn update_bulk_routes(
    State(state): State<AppState>,
    body: Result<Json<PermissionsMapBody>, JsonRejection>,
) -> ApiResult<UpdatedBody> {
    let Json(request) = body?;
    for rules in request.permissions_map.values() {
        check_rules(rules)?;
    }

    let updated = state.route_store.store_many(request.permissions_map).await?;

    info!("Route permissions updated for {} users", updated);
    Ok(Json(ApiResponse::success(UpdatedBody { updated })))
}
