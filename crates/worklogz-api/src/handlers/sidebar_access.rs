// ============================================================================
// Worklogz API - Sidebar Access Handlers
// File: crates/worklogz-api/src/handlers/sidebar_access.rs
// ============================================================================
//! `/api/sidebar-access`. Missing entries are answered with the scope
//! default, `null` and `[]` are passed through untouched.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use tracing::info;

use worklogz_core::dto::{
    AccessPathsBody, AccessQuery, BulkAccessBody, BulkAccessQuery, BulkUpdateAccessRequest,
    UpdateAccessRequest, UpdatedBody,
};
use worklogz_core::AccessPaths;
use worklogz_core::repositories::AccessStore;
use worklogz_shared::utils::split_user_ids;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn check_paths(paths: &AccessPaths) -> Result<(), ApiError> {
    let Some(paths) = paths else {
        return Ok(());
    };
    match paths.iter().find(|p| !p.starts_with('/')) {
        Some(bad) => Err(ApiError::Validation(format!("Access path must start with '/': {}", bad))),
        None => Ok(()),
    }
}

/// GET /api/sidebar-access/{user_id}?scope=
pub async fn get_access(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<AccessQuery>, QueryRejection>,
) -> ApiResult<AccessPathsBody> {
    let Query(query) = query?;
    let paths = state.access_store.fetch_paths(&user_id, query.scope).await?;
    Ok(Json(ApiResponse::success(AccessPathsBody { paths })))
}

/// PUT /api/sidebar-access/{user_id}
pub async fn update_access(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<UpdateAccessRequest>, JsonRejection>,
) -> ApiResult<AccessPathsBody> {
    let Json(request) = body?;
    check_paths(&request.paths)?;

    let paths = state
        .access_store
        .store_paths(&user_id, request.scope, request.paths)
        .await?;

    info!("Sidebar access updated for {} ({})", user_id, request.scope);
    Ok(Json(ApiResponse::success(AccessPathsBody { paths })))
}

/// GET /api/sidebar-access/bulk?userIds=a,b&scope=
pub async fn get_bulk_access(
    State(state): State<AppState>,
    query: Result<Query<BulkAccessQuery>, QueryRejection>,
) -> ApiResult<BulkAccessBody> {
    let Query(query) = query?;
    let user_ids = split_user_ids(&query.user_ids);
    let access = state.access_store.fetch_many(&user_ids, query.scope).await?;
    Ok(Json(ApiResponse::success(BulkAccessBody { access })))
}

/// PUT /api/sidebar-access/bulk
pub async fn update_bulk_access(
    State(state): State<AppState>,
    body: Result<Json<BulkUpdateAccessRequest>, JsonRejection>,
) -> ApiResult<UpdatedBody> {
    let Json(request) = body?;
    if request.user_ids.is_empty() {
        return Err(ApiError::Validation("userIds must not be empty".to_string()));
    }
    check_paths(&request.paths)?;

    let updated = state
        .access_store
        .store_many(&request.user_ids, request.scope, request.paths)
        .await?;

    info!("Sidebar access updated for {} users ({})", updated, request.scope);
    Ok(Json(ApiResponse::success(UpdatedBody { updated })))
}
