// ============================================================================
// Worklogz API - Route Permission Guard
// File: crates/worklogz-api/src/middleware/route_guard.rs
// ============================================================================
//! Checks every API request against the caller's stored route rules.
//!
//! The caller is identified by a bearer JWT (`sub`, `scope`). Admin scope
//! and configured admin users pass without a rule lookup.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use worklogz_core::repositories::RoutePermissionStore;
use worklogz_core::{is_authorized, RouteMethod, Scope};

use crate::error::ApiError;
use crate::state::AppState;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn route_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.access.enforce_route_permissions {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;
    let claims = state
        .jwt
        .validate_token(token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let is_admin = claims.scope.parse::<Scope>().ok() == Some(Scope::Admin)
        || state.access.admin_user_ids.iter().any(|id| id == &claims.sub);

    if !is_admin {
        let path = request.uri().path().to_string();
        let method: RouteMethod = request
            .method()
            .as_str()
            .parse()
            .map_err(|_| ApiError::Forbidden(format!("Method {} not permitted", request.method())))?;

        let rules = state.route_store.fetch_routes(&claims.sub).await?;
        if !is_authorized(&rules, &path, method) {
            warn!("Route denied for {}: {} {}", claims.sub, method, path);
            return Err(ApiError::Forbidden(format!("{} {} not permitted", method, path)));
        }
        debug!("Route allowed for {}: {} {}", claims.sub, method, path);
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
