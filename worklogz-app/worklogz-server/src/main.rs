use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use worklogz_api::{build_router, AppState};
use worklogz_core::repositories::{AccessStore, RoutePermissionStore, SidebarMenuStore};
use worklogz_infrastructure::{
    create_pool, ensure_schema, MemoryAccessStore, MemoryRoutePermissionStore, MemorySidebarMenuStore,
    PgAccessStore, PgRoutePermissionStore, PgSidebarMenuStore,
};
use worklogz_security::JwtService;
use worklogz_shared::config::AppConfig;
use worklogz_shared::telemetry::LogOutput;

struct Stores {
    access: Arc<dyn AccessStore>,
    routes: Arc<dyn RoutePermissionStore>,
    menus: Arc<dyn SidebarMenuStore>,
}

async fn build_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    let Some(url) = config.database.url.as_deref() else {
        warn!("No database.url configured, access data is kept in memory");
        return Ok(Stores {
            access: Arc::new(MemoryAccessStore::new()),
            routes: Arc::new(MemoryRoutePermissionStore::new()),
            menus: Arc::new(MemorySidebarMenuStore::new()),
        });
    };

    info!("Connecting to database...");
    let pool = create_pool(url, config.database.max_connections).await?;
    ensure_schema(&pool).await?;
    info!("Database connection established.");

    Ok(Stores {
        access: Arc::new(PgAccessStore::new(pool.clone())),
        routes: Arc::new(PgRoutePermissionStore::new(pool.clone())),
        menus: Arc::new(PgSidebarMenuStore::new(pool)),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env included)
    let config = AppConfig::load()?;

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = worklogz_shared::telemetry::init_telemetry(&config.log, LogOutput::Stdout)?;

    info!("{} server starting ({})", config.app.name, config.app.env);

    let stores = match build_stores(&config).await {
        Ok(stores) => stores,
        Err(e) => {
            error!("Failed to initialise stores: {}", e);
            return Err(e);
        }
    };

    if config.access.enforce_route_permissions {
        info!(
            "Route permissions enforced ({} admin users)",
            config.access.admin_user_ids.len()
        );
    }

    let state = AppState {
        access_store: stores.access,
        route_store: stores.routes,
        menu_store: stores.menus,
        jwt: JwtService::new(config.jwt.secret.clone(), config.jwt.access_token_expiry),
        access: config.access.clone(),
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
