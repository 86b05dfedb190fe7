// ============================================================================
// Worklogz Infrastructure - PostgreSQL Sidebar Menu Store
// File: crates/worklogz-infrastructure/src/database/postgres/sidebar_menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{error, info};

use worklogz_core::domain::default_menu::default_menu;
use worklogz_core::domain::{MenuItem, Scope};
use worklogz_core::error::DomainError;
use worklogz_core::repositories::SidebarMenuStore;

pub struct PgSidebarMenuStore {
    pool: PgPool,
}

impl PgSidebarMenuStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SidebarMenuStore for PgSidebarMenuStore {
    async fn fetch_menu(&self, scope: Scope) -> Result<Vec<MenuItem>, DomainError> {
        let row: Option<(Json<Vec<MenuItem>>,)> = sqlx::query_as(
            r#"
            SELECT items
            FROM sidebar_menus
            WHERE scope = $1
            "#
        )
        .bind(scope.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding {} sidebar menu: {}", scope, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|(items,)| items.0).unwrap_or_else(|| default_menu(scope)))
    }

    async fn store_menu(&self, scope: Scope, items: Vec<MenuItem>) -> Result<Vec<MenuItem>, DomainError> {
        let (stored,): (Json<Vec<MenuItem>>,) = sqlx::query_as(
            r#"
            INSERT INTO sidebar_menus (scope, items, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (scope)
            DO UPDATE SET items = EXCLUDED.items, updated_at = NOW()
            RETURNING items
            "#
        )
        .bind(scope.as_str())
        .bind(Json(&items))
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error saving {} sidebar menu: {}", scope, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Sidebar menu saved: {} ({} items)", scope, stored.0.len());
        Ok(stored.0)
    }
}
