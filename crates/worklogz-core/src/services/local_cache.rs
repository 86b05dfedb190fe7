// ============================================================================
// Worklogz Core - Local Cache
// File: crates/worklogz-core/src/services/local_cache.rs
// ============================================================================
//! Client-side mirror of the backend, stored as JSON blobs under namespaced
//! keys of a [`KeyValueStore`].
//!
//! Reads never fail: a missing or unparsable blob is an empty map. Writes
//! are best-effort and only logged on failure.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use worklogz_shared::constants::{
    ROUTE_PERMISSIONS_CACHE_KEY, SIDEBAR_ACCESS_CACHE_KEY, SIDEBAR_MENU_CACHE_KEY,
};

use crate::domain::{AccessPaths, MenuItem, RouteRule, Scope, UserId};
use crate::repositories::KeyValueStore;

/// `{ scope: { user_id: paths } }`
type AccessBlob = BTreeMap<String, BTreeMap<UserId, AccessPaths>>;
/// `{ user_id: routes }`
type RoutesBlob = BTreeMap<UserId, Vec<RouteRule>>;
/// `{ scope: items }`
type MenuBlob = BTreeMap<String, Vec<MenuItem>>;

pub struct LocalCache {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl LocalCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    // --- Sidebar access ---

    /// Outer `None` means the user has no cached entry.
    pub fn access_paths(&self, scope: Scope, user_id: &str) -> Option<AccessPaths> {
        let blob: AccessBlob = self.read_blob(SIDEBAR_ACCESS_CACHE_KEY);
        blob.get(scope.as_str())?.get(user_id).cloned()
    }

    pub fn set_access_paths(&self, scope: Scope, user_id: &str, paths: &AccessPaths) {
        self.set_access_paths_many(scope, [(user_id.to_string(), paths.clone())]);
    }

    pub fn set_access_paths_many<I>(&self, scope: Scope, entries: I)
    where
        I: IntoIterator<Item = (UserId, AccessPaths)>,
    {
        let _guard = self.write_lock.lock();
        let mut blob: AccessBlob = self.read_blob(SIDEBAR_ACCESS_CACHE_KEY);
        let users = blob.entry(scope.as_str().to_string()).or_default();
        for (user_id, paths) in entries {
            users.insert(user_id, paths);
        }
        self.write_blob(SIDEBAR_ACCESS_CACHE_KEY, &blob);
    }

    // --- Route permissions ---

    pub fn route_rules(&self, user_id: &str) -> Option<Vec<RouteRule>> {
        let blob: RoutesBlob = self.read_blob(ROUTE_PERMISSIONS_CACHE_KEY);
        blob.get(user_id).cloned()
    }

    pub fn set_route_rules(&self, user_id: &str, routes: &[RouteRule]) {
        self.set_route_rules_many([(user_id.to_string(), routes.to_vec())]);
    }

    pub fn set_route_rules_many<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (UserId, Vec<RouteRule>)>,
    {
        let _guard = self.write_lock.lock();
        let mut blob: RoutesBlob = self.read_blob(ROUTE_PERMISSIONS_CACHE_KEY);
        blob.extend(entries);
        self.write_blob(ROUTE_PERMISSIONS_CACHE_KEY, &blob);
    }

    // --- Sidebar menu ---

    pub fn menu(&self, scope: Scope) -> Option<Vec<MenuItem>> {
        let blob: MenuBlob = self.read_blob(SIDEBAR_MENU_CACHE_KEY);
        blob.get(scope.as_str()).cloned()
    }

    pub fn set_menu(&self, scope: Scope, items: &[MenuItem]) {
        let _guard = self.write_lock.lock();
        let mut blob: MenuBlob = self.read_blob(SIDEBAR_MENU_CACHE_KEY);
        blob.insert(scope.as_str().to_string(), items.to_vec());
        self.write_blob(SIDEBAR_MENU_CACHE_KEY, &blob);
    }

    /// Cached access for every requested user that has an entry.
    pub fn access_paths_for(&self, scope: Scope, user_ids: &[UserId]) -> HashMap<UserId, AccessPaths> {
        let blob: AccessBlob = self.read_blob(SIDEBAR_ACCESS_CACHE_KEY);
        let Some(users) = blob.get(scope.as_str()) else {
            return HashMap::new();
        };
        user_ids
            .iter()
            .filter_map(|id| users.get(id).map(|paths| (id.clone(), paths.clone())))
            .collect()
    }

    // --- Helpers ---

    fn read_blob<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!("Local cache read failed for {}: {}", key, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Local cache entry {} is corrupt, treating as empty: {}", key, e);
                T::default()
            }
        }
    }

    fn write_blob<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode local cache entry {}: {}", key, e);
                return;
            }
        };

        match self.store.set(key, &raw) {
            Ok(()) => debug!("Local cache entry {} updated ({} bytes)", key, raw.len()),
            Err(e) => warn!("Local cache write failed for {}: {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteMethod;
    use crate::error::DomainError;
    use crate::repositories::MemoryKeyValueStore;

    fn cache_with(store: Arc<MemoryKeyValueStore>) -> LocalCache {
        LocalCache::new(store)
    }

    #[test]
    fn test_access_round_trip_keeps_sentinels() {
        let cache = cache_with(Arc::new(MemoryKeyValueStore::new()));

        assert!(cache.access_paths(Scope::Employee, "u1").is_none());

        cache.set_access_paths(Scope::Employee, "u1", &None);
        cache.set_access_paths(Scope::Admin, "u1", &Some(vec![]));
        cache.set_access_paths(Scope::Admin, "u2", &Some(vec!["/payouts".to_string()]));

        assert_eq!(cache.access_paths(Scope::Employee, "u1"), Some(None));
        assert_eq!(cache.access_paths(Scope::Admin, "u1"), Some(Some(vec![])));
        assert_eq!(
            cache.access_paths(Scope::Admin, "u2"),
            Some(Some(vec!["/payouts".to_string()]))
        );
    }

    #[test]
    fn test_blob_layout() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cache = cache_with(store.clone());
        cache.set_access_paths(Scope::Admin, "u1", &Some(vec!["/dashboard".to_string()]));

        let raw = store.get(SIDEBAR_ACCESS_CACHE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json, serde_json::json!({ "admin": { "u1": ["/dashboard"] } }));
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(SIDEBAR_ACCESS_CACHE_KEY, "{not json").unwrap();
        store.set(ROUTE_PERMISSIONS_CACHE_KEY, "[1, 2, 3]").unwrap();
        let cache = cache_with(store);

        assert!(cache.access_paths(Scope::Admin, "u1").is_none());
        assert!(cache.route_rules("u1").is_none());

        // Next write replaces the corrupt blob
        cache.set_access_paths(Scope::Admin, "u1", &Some(vec![]));
        assert_eq!(cache.access_paths(Scope::Admin, "u1"), Some(Some(vec![])));
    }

    #[test]
    fn test_route_rules_and_menu() {
        let cache = cache_with(Arc::new(MemoryKeyValueStore::new()));
        let rules = vec![RouteRule::new("/users/:id", [RouteMethod::Get])];

        cache.set_route_rules("u1", &rules);
        assert_eq!(cache.route_rules("u1"), Some(rules));
        assert!(cache.route_rules("u2").is_none());

        let menu = vec![MenuItem::leaf("Home", "/home", None)];
        cache.set_menu(Scope::Employee, &menu);
        assert_eq!(cache.menu(Scope::Employee), Some(menu));
        assert!(cache.menu(Scope::Admin).is_none());
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
            Err(DomainError::StorageError("disk unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
            Err(DomainError::StorageError("disk unavailable".to_string()))
        }
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let cache = LocalCache::new(Arc::new(BrokenStore));
        cache.set_access_paths(Scope::Admin, "u1", &Some(vec![]));
        assert!(cache.access_paths(Scope::Admin, "u1").is_none());
    }
}
