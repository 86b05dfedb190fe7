// ============================================================================
// Worklogz Infrastructure - PostgreSQL Sidebar Access Store
// File: crates/worklogz-infrastructure/src/database/postgres/access_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use worklogz_core::domain::{AccessPaths, Scope, UserId};
use worklogz_core::error::DomainError;
use worklogz_core::repositories::AccessStore;

pub struct PgAccessStore {
    pool: PgPool,
}

impl PgAccessStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccessRow {
    user_id: String,
    paths: Json<AccessPaths>,
}

#[async_trait]
impl AccessStore for PgAccessStore {
    async fn fetch_paths(&self, user_id: &str, scope: Scope) -> Result<AccessPaths, DomainError> {
        let row: Option<AccessRow> = sqlx::query_as(
            r#"
            SELECT user_id, paths
            FROM sidebar_access
            WHERE user_id = $1 AND scope = $2
            "#
        )
        .bind(user_id)
        .bind(scope.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding sidebar access for {}: {}", user_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.paths.0).unwrap_or_else(|| scope.default_paths()))
    }

    async fn store_paths(&self, user_id: &str, scope: Scope, paths: AccessPaths) -> Result<AccessPaths, DomainError> {
        let row: AccessRow = sqlx::query_as(
            r#"
            INSERT INTO sidebar_access (user_id, scope, paths, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, scope)
            DO UPDATE SET paths = EXCLUDED.paths, updated_at = NOW()
            RETURNING user_id, paths
            "#
        )
        .bind(user_id)
        .bind(scope.as_str())
        .bind(Json(&paths))
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error saving sidebar access for {}: {}", user_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Sidebar access saved: {} ({})", row.user_id, scope);
        Ok(row.paths.0)
    }

    async fn fetch_many(&self, user_ids: &[UserId], scope: Scope) -> Result<HashMap<UserId, AccessPaths>, DomainError> {
        let rows: Vec<AccessRow> = sqlx::query_as(
            r#"
            SELECT user_id, paths
            FROM sidebar_access
            WHERE scope = $1 AND user_id = ANY($2)
            "#
        )
        .bind(scope.as_str())
        .bind(user_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding sidebar access for {} users: {}", user_ids.len(), e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut found: HashMap<UserId, AccessPaths> =
            rows.into_iter().map(|r| (r.user_id, r.paths.0)).collect();

        Ok(user_ids
            .iter()
            .map(|id| {
                let paths = found.remove(id).unwrap_or_else(|| scope.default_paths());
                (id.clone(), paths)
            })
            .collect())
    }

    /// One upsert per user, no transaction.
    async fn store_many(&self, user_ids: &[UserId], scope: Scope, paths: AccessPaths) -> Result<usize, DomainError> {
        for user_id in user_ids {
            self.store_paths(user_id, scope, paths.clone()).await?;
        }
        Ok(user_ids.len())
    }
}
