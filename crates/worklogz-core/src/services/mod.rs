//! Domain services: local cache, sync facades and the menu filter

pub mod local_cache;
pub mod access_sync_service;
pub mod route_permission_service;
pub mod menu_filter;
pub mod menu_service;

use std::future::Future;
use std::time::Duration;

use crate::error::DomainError;

pub use local_cache::LocalCache;
pub use access_sync_service::AccessSyncService;
pub use route_permission_service::RoutePermissionService;
pub use menu_service::MenuService;

/// How a write reached its destinations. Writes never fail for the caller:
/// the local cache is always updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Backend and cache both hold the new value.
    Synced,
    /// Backend write failed; only the cache holds the new value.
    LocalOnly,
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

/// Runs a backend call under a deadline. Expiry drops the in-flight request
/// and is reported like any other remote failure.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::Timeout(deadline.as_millis() as u64)),
    }
}
