//! Application-wide constants

pub const API_PREFIX: &str = "/api";

/// Local cache key holding `{ scope: { user_id: paths } }`.
pub const SIDEBAR_ACCESS_CACHE_KEY: &str = "worklogz.sidebarAccess";
/// Local cache key holding `{ user_id: routes }`.
pub const ROUTE_PERMISSIONS_CACHE_KEY: &str = "worklogz.routePermissions";
/// Local cache key holding `{ scope: items }`.
pub const SIDEBAR_MENU_CACHE_KEY: &str = "worklogz.sidebarMenu";

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const USER_ID_SEPARATOR: char = ',';
