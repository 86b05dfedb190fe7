// ============================================================================
// Worklogz Core - Sidebar Access Sync Service
// File: crates/worklogz-core/src/services/access_sync_service.rs
// ============================================================================
//! Sidebar access facade: backend first, local cache as fallback.
//!
//! No operation returns an error. A backend failure (network, non-2xx,
//! decode, deadline) degrades to the cache and is logged.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{AccessPaths, Scope, UserId};
use crate::repositories::AccessStore;
use crate::services::local_cache::LocalCache;
use crate::services::{with_deadline, SyncOutcome};

pub struct AccessSyncService {
    store: Arc<dyn AccessStore>,
    cache: Arc<LocalCache>,
    request_timeout: Duration,
}

impl AccessSyncService {
    pub fn new(store: Arc<dyn AccessStore>, cache: Arc<LocalCache>, request_timeout: Duration) -> Self {
        Self {
            store,
            cache,
            request_timeout,
        }
    }

    /// Current paths of a user, `null` and `[]` returned verbatim.
    pub async fn get(&self, user_id: &str, scope: Scope) -> AccessPaths {
        match with_deadline(self.request_timeout, self.store.fetch_paths(user_id, scope)).await {
            Ok(paths) => {
                debug!("Fetched {} sidebar access for {}", scope, user_id);
                self.cache.set_access_paths(scope, user_id, &paths);
                paths
            }
            Err(e) => {
                warn!(
                    "Sidebar access fetch failed for {} ({}), using local cache: {}",
                    user_id, scope, e
                );
                self.cached_or_default(user_id, scope)
            }
        }
    }

    /// Replaces the user's paths. The cache is updated whatever the backend
    /// answers.
    pub async fn set(&self, user_id: &str, scope: Scope, paths: AccessPaths) -> SyncOutcome {
        let remote = with_deadline(
            self.request_timeout,
            self.store.store_paths(user_id, scope, paths.clone()),
        )
        .await;

        self.cache.set_access_paths(scope, user_id, &paths);

        match remote {
            Ok(_) => {
                debug!("Saved {} sidebar access for {}", scope, user_id);
                SyncOutcome::Synced
            }
            Err(e) => {
                warn!(
                    "Sidebar access save failed for {} ({}), kept locally: {}",
                    user_id, scope, e
                );
                SyncOutcome::LocalOnly
            }
        }
    }

    /// Same paths for every user. Not atomic and never rolled back.
    pub async fn bulk_set(&self, user_ids: &[UserId], scope: Scope, paths: AccessPaths) -> SyncOutcome {
        let remote = with_deadline(
            self.request_timeout,
            self.store.store_many(user_ids, scope, paths.clone()),
        )
        .await;

        self.cache.set_access_paths_many(
            scope,
            user_ids.iter().map(|id| (id.clone(), paths.clone())),
        );

        match remote {
            Ok(updated) => {
                debug!("Saved {} sidebar access for {} users", scope, updated);
                SyncOutcome::Synced
            }
            Err(e) => {
                warn!(
                    "Bulk sidebar access save failed for {} users ({}), kept locally: {}",
                    user_ids.len(),
                    scope,
                    e
                );
                SyncOutcome::LocalOnly
            }
        }
    }

    /// One backend round trip for all users; users the backend cannot
    /// answer for fall back to cache, then scope default.
    pub async fn bulk_get(&self, user_ids: &[UserId], scope: Scope) -> HashMap<UserId, AccessPaths> {
        let mut fetched = match with_deadline(self.request_timeout, self.store.fetch_many(user_ids, scope)).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(
                    "Bulk sidebar access fetch failed for {} users ({}), using local cache: {}",
                    user_ids.len(),
                    scope,
                    e
                );
                HashMap::new()
            }
        };

        let synced: Vec<(UserId, AccessPaths)> = user_ids
            .iter()
            .filter_map(|id| fetched.get(id).map(|paths| (id.clone(), paths.clone())))
            .collect();
        if !synced.is_empty() {
            self.cache.set_access_paths_many(scope, synced);
        }

        let cached = self.cache.access_paths_for(scope, user_ids);
        user_ids
            .iter()
            .map(|id| {
                let paths = fetched
                    .remove(id)
                    .or_else(|| cached.get(id).cloned())
                    .unwrap_or_else(|| scope.default_paths());
                (id.clone(), paths)
            })
            .collect()
    }

    fn cached_or_default(&self, user_id: &str, scope: Scope) -> AccessPaths {
        self.cache
            .access_paths(scope, user_id)
            .unwrap_or_else(|| scope.default_paths())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::repositories::{MemoryKeyValueStore, MockAccessStore};

    fn service(store: MockAccessStore) -> (AccessSyncService, Arc<LocalCache>) {
        let cache = Arc::new(LocalCache::new(Arc::new(MemoryKeyValueStore::new())));
        let service = AccessSyncService::new(Arc::new(store), cache.clone(), Duration::from_millis(200));
        (service, cache)
    }

    fn offline() -> DomainError {
        DomainError::NetworkError("connection refused".to_string())
    }

    fn paths(items: &[&str]) -> AccessPaths {
        Some(items.iter().map(|p| p.to_string()).collect())
    }

    #[tokio::test]
    async fn test_get_returns_backend_value_and_caches_it() {
        let mut store = MockAccessStore::new();
        store
            .expect_fetch_paths()
            .returning(|_, _| Ok(Some(vec!["/payroll".to_string()])));

        let (service, cache) = service(store);
        assert_eq!(service.get("u1", Scope::Employee).await, paths(&["/payroll"]));
        assert_eq!(cache.access_paths(Scope::Employee, "u1"), Some(paths(&["/payroll"])));
    }

    #[tokio::test]
    async fn test_get_keeps_sentinels_verbatim() {
        let mut store = MockAccessStore::new();
        store.expect_fetch_paths().returning(|_, scope| match scope {
            Scope::Admin => Ok(None),
            Scope::Employee => Ok(Some(vec![])),
        });

        let (service, _) = service(store);
        assert_eq!(service.get("u1", Scope::Admin).await, None);
        assert_eq!(service.get("u1", Scope::Employee).await, Some(vec![]));
    }

    #[tokio::test]
    async fn test_get_offline_falls_back_to_scope_default() {
        let mut store = MockAccessStore::new();
        store.expect_fetch_paths().returning(|_, _| Err(offline()));

        let (service, _) = service(store);
        assert_eq!(service.get("u1", Scope::Admin).await, Some(vec![]));
        assert_eq!(service.get("u1", Scope::Employee).await, None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip_while_offline() {
        let mut store = MockAccessStore::new();
        store.expect_store_paths().returning(|_, _, _| Err(offline()));
        store.expect_fetch_paths().returning(|_, _| Err(offline()));

        let (service, _) = service(store);
        let outcome = service.set("u1", Scope::Employee, paths(&["/home", "/payroll"])).await;

        assert_eq!(outcome, SyncOutcome::LocalOnly);
        assert_eq!(service.get("u1", Scope::Employee).await, paths(&["/home", "/payroll"]));
    }

    #[tokio::test]
    async fn test_set_synced() {
        let mut store = MockAccessStore::new();
        store
            .expect_store_paths()
            .withf(|user_id, scope, paths| {
                user_id.to_string() == "u1" && *scope == Scope::Admin && paths.as_deref() == Some(&["/payouts".to_string()][..])
            })
            .times(1)
            .returning(|_, _, paths| Ok(paths));

        let (service, cache) = service(store);
        let outcome = service.set("u1", Scope::Admin, paths(&["/payouts"])).await;

        assert!(outcome.is_synced());
        assert_eq!(cache.access_paths(Scope::Admin, "u1"), Some(paths(&["/payouts"])));
    }

    #[tokio::test]
    async fn test_bulk_set_empty_admin_list_for_every_user() {
        let mut store = MockAccessStore::new();
        store.expect_store_many().returning(|_, _, _| Err(offline()));
        store.expect_fetch_paths().returning(|_, _| Err(offline()));

        let (service, _) = service(store);
        let users = vec!["u1".to_string(), "u2".to_string()];
        let outcome = service.bulk_set(&users, Scope::Admin, Some(vec![])).await;

        assert_eq!(outcome, SyncOutcome::LocalOnly);
        assert_eq!(service.get("u1", Scope::Admin).await, Some(vec![]));
        assert_eq!(service.get("u2", Scope::Admin).await, Some(vec![]));
    }

    #[tokio::test]
    async fn test_bulk_get_mixes_backend_cache_and_default() {
        let mut store = MockAccessStore::new();
        store.expect_fetch_many().returning(|_, _| {
            Ok(HashMap::from([("u1".to_string(), Some(vec!["/leave".to_string()]))]))
        });

        let (service, cache) = service(store);
        cache.set_access_paths(Scope::Employee, "u2", &Some(vec!["/payroll".to_string()]));

        let users = vec!["u1".to_string(), "u2".to_string(), "u3".to_string()];
        let result = service.bulk_get(&users, Scope::Employee).await;

        assert_eq!(result["u1"], paths(&["/leave"]));
        assert_eq!(result["u2"], paths(&["/payroll"]));
        assert_eq!(result["u3"], None);
        assert_eq!(cache.access_paths(Scope::Employee, "u1"), Some(paths(&["/leave"])));
    }

    #[tokio::test]
    async fn test_bulk_get_offline_uses_cache_per_user() {
        let mut store = MockAccessStore::new();
        store.expect_fetch_many().returning(|_, _| Err(offline()));

        let (service, cache) = service(store);
        cache.set_access_paths(Scope::Admin, "u1", &None);

        let users = vec!["u1".to_string(), "u2".to_string()];
        let result = service.bulk_get(&users, Scope::Admin).await;

        assert_eq!(result["u1"], None);
        assert_eq!(result["u2"], Some(vec![]));
    }

    struct SlowStore;

    #[async_trait::async_trait]
    impl AccessStore for SlowStore {
        async fn fetch_paths(&self, _user_id: &str, _scope: Scope) -> Result<AccessPaths, DomainError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }

        async fn store_paths(&self, _user_id: &str, _scope: Scope, paths: AccessPaths) -> Result<AccessPaths, DomainError> {
            Ok(paths)
        }

        async fn fetch_many(&self, _user_ids: &[UserId], _scope: Scope) -> Result<HashMap<UserId, AccessPaths>, DomainError> {
            Ok(HashMap::new())
        }

        async fn store_many(&self, user_ids: &[UserId], _scope: Scope, _paths: AccessPaths) -> Result<usize, DomainError> {
            Ok(user_ids.len())
        }
    }

    #[tokio::test]
    async fn test_deadline_falls_back_to_cache() {
        let cache = Arc::new(LocalCache::new(Arc::new(MemoryKeyValueStore::new())));
        cache.set_access_paths(Scope::Employee, "u1", &Some(vec!["/home".to_string()]));
        let service = AccessSyncService::new(Arc::new(SlowStore), cache, Duration::from_millis(100));

        assert_eq!(service.get("u1", Scope::Employee).await, paths(&["/home"]));
    }
}
