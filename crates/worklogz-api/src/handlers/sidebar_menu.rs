// ============================================================================
// Worklogz API - Sidebar Menu Handlers
// File: crates/worklogz-api/src/handlers/sidebar_menu.rs
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;

use worklogz_core::dto::MenuBody;
use worklogz_core::services::menu_filter::normalize_order;
use worklogz_core::{validate_menu, Scope};
use worklogz_core::repositories::SidebarMenuStore;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/sidebar-menu/{scope}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Result<Json<ApiResponse<MenuBody>>, ApiError> {
    let scope: Scope = scope.parse()?;
    let items = state.menu_store.fetch_menu(scope).await?;
    Ok(Json(ApiResponse::success(MenuBody { items })))
}

/// PUT /api/sidebar-menu/{scope}
pub async fn update_menu(
    State(state): State<AppState>,
    Path(scope): Path<String>,
    body: Result<Json<MenuBody>, JsonRejection>,
) -> Result<Json<ApiResponse<MenuBody>>, ApiError> {
    let scope: Scope = scope.parse()?;
    let Json(request) = body?;
    validate_menu(&request.items)?;

    let items = state
        .menu_store
        .store_menu(scope, normalize_order(request.items))
        .await?;

    info!("Sidebar menu updated for {} ({} items)", scope, items.len());
    Ok(Json(ApiResponse::success(MenuBody { items })))
}
