//! Database connection pool and schema bootstrap

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(url)
        .await
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS sidebar_access (
        user_id     TEXT NOT NULL,
        scope       TEXT NOT NULL,
        paths       JSONB NOT NULL DEFAULT 'null'::jsonb,
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, scope)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS route_permissions (
        user_id     TEXT PRIMARY KEY,
        routes      JSONB NOT NULL DEFAULT '[]'::jsonb,
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sidebar_menus (
        scope       TEXT PRIMARY KEY,
        items       JSONB NOT NULL DEFAULT '[]'::jsonb,
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Creates the access tables when missing. `paths` holds JSON `null` for an
/// unrestricted entry, never SQL NULL.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
