// ============================================================================
// Worklogz Infrastructure - PostgreSQL Route Permission Store
// File: crates/worklogz-infrastructure/src/database/postgres/route_permission_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use worklogz_core::domain::{RouteRule, UserId};
use worklogz_core::error::DomainError;
use worklogz_core::repositories::RoutePermissionStore;

pub struct PgRoutePermissionStore {
    pool: PgPool,
}

impl PgRoutePermissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoutesRow {
    user_id: String,
    routes: Json<Vec<RouteRule>>,
}

#[async_trait]
impl RoutePermissionStore for PgRoutePermissionStore {
    async fn fetch_routes(&self, user_id: &str) -> Result<Vec<RouteRule>, DomainError> {
        let row: Option<RoutesRow> = sqlx::query_as(
            r#"
            SELECT user_id, routes
            FROM route_permissions
            WHERE user_id = $1
            "#
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding route permissions for {}: {}", user_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.routes.0).unwrap_or_default())
    }

    async fn store_routes(&self, user_id: &str, routes: Vec<RouteRule>) -> Result<Vec<RouteRule>, DomainError> {
        let row: RoutesRow = sqlx::query_as(
            r#"
            INSERT INTO route_permissions (user_id, routes, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET routes = EXCLUDED.routes, updated_at = NOW()
            RETURNING user_id, routes
            "#
        )
        .bind(user_id)
        .bind(Json(&routes))
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error saving route permissions for {}: {}", user_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Route permissions saved: {} ({} rules)", row.user_id, row.routes.0.len());
        Ok(row.routes.0)
    }

    async fn fetch_many(&self, user_ids: &[UserId]) -> Result<HashMap<UserId, Vec<RouteRule>>, DomainError> {
        let rows: Vec<RoutesRow> = sqlx::query_as(
            r#"
            SELECT user_id, routes
            FROM route_permissions
            WHERE user_id = ANY($1)
            "#
        )
        .bind(user_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding route permissions for {} users: {}", user_ids.len(), e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut found: HashMap<UserId, Vec<RouteRule>> =
            rows.into_iter().map(|r| (r.user_id, r.routes.0)).collect();

        Ok(user_ids
            .iter()
            .map(|id| (id.clone(), found.remove(id).unwrap_or_default()))
            .collect())
    }

    /// One upsert per user, no transaction.
    async fn store_many(&self, permissions: HashMap<UserId, Vec<RouteRule>>) -> Result<usize, DomainError> {
        let count = permissions.len();
        for (user_id, routes) in permissions {
            self.store_routes(&user_id, routes).await?;
        }
        Ok(count)
    }
}
