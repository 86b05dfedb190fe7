//! Application router

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use worklogz_shared::constants::API_PREFIX;

use crate::handlers::{health, route_permissions, sidebar_access, sidebar_menu};
use crate::middleware::route_guard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            &format!("{API_PREFIX}/sidebar-access/bulk"),
            get(sidebar_access::get_bulk_access).put(sidebar_access::update_bulk_access),
        )
        .route(
            &format!("{API_PREFIX}/sidebar-access/{{user_id}}"),
            get(sidebar_access::get_access).put(sidebar_access::update_access),
        )
        .route(
            &format!("{API_PREFIX}/route-permissions/bulk"),
            get(route_permissions::get_bulk_routes).put(route_permissions::update_bulk_routes),
        )
        .route(
            &format!("{API_PREFIX}/route-permissions/{{user_id}}"),
            get(route_permissions::get_routes).put(route_permissions::update_routes),
        )
        .route(
            &format!("{API_PREFIX}/sidebar-menu/{{scope}}"),
            get(sidebar_menu::get_menu).put(sidebar_menu::update_menu),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), route_guard));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
