//! Configuration management

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_REQUEST_TIMEOUT_MS};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendSettings,
    pub cache: CacheSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub access: AccessSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Where the sync facades reach the backend of record.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub request_timeout_ms: u64,
    /// Bearer token attached to every backend call.
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    /// JSON file backing the local key-value store.
    pub path: String,
}

/// Without a `url` the server keeps its stores in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessSettings {
    pub enforce_route_permissions: bool,
    #[serde(default)]
    pub admin_user_ids: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// `json` or `pretty`.
    pub format: String,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
}

/// The slice of [`AppConfig`] a backend client needs. Loaded from the same
/// sources, so no server secrets are required.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub backend: BackendSettings,
    pub cache: CacheSettings,
    pub log: LogSettings,
}

impl AppConfig {
    /// Fails when `jwt.secret` is not configured.
    pub fn load() -> Result<Self, ConfigError> {
        layered()?.try_deserialize()
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        layered()?.try_deserialize()
    }
}

fn layered() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
    defaults()?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(
            Environment::default()
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("access.admin_user_ids")
                .try_parsing(true),
        )
        .build()
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("app.env", "development")?
        .set_default("app.host", "127.0.0.1")?
        .set_default("app.port", 8080)?
        .set_default("app.name", "worklogz-server")?
        .set_default("backend.base_url", "http://127.0.0.1:8080/api")?
        .set_default("backend.request_timeout_ms", DEFAULT_REQUEST_TIMEOUT_MS)?
        .set_default("cache.path", ".worklogz/cache.json")?
        .set_default("database.max_connections", 5)?
        .set_default("jwt.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
        .set_default("access.enforce_route_permissions", false)?
        .set_default("log.format", "pretty")
}
