// ============================================================================
// Worklogz Core - Route Permission Sync Service
// File: crates/worklogz-core/src/services/route_permission_service.rs
// ============================================================================
//! Route permission facade with the same fallback rules as
//! [`crate::services::AccessSyncService`]. A user nobody knows about has no
//! rules, so nothing is authorized.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{is_authorized, RouteMethod, RouteRule, UserId};
use crate::repositories::RoutePermissionStore;
use crate::services::local_cache::LocalCache;
use crate::services::{with_deadline, SyncOutcome};

pub struct RoutePermissionService {
    store: Arc<dyn RoutePermissionStore>,
    cache: Arc<LocalCache>,
    request_timeout: Duration,
}

impl RoutePermissionService {
    pub fn new(
        store: Arc<dyn RoutePermissionStore>,
        cache: Arc<LocalCache>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            request_timeout,
        }
    }

    pub async fn get(&self, user_id: &str) -> Vec<RouteRule> {
        match with_deadline(self.request_timeout, self.store.fetch_routes(user_id)).await {
            Ok(routes) => {
                debug!("Fetched {} route rules for {}", routes.len(), user_id);
                self.cache.set_route_rules(user_id, &routes);
                routes
            }
            Err(e) => {
                warn!("Route permission fetch failed for {}, using local cache: {}", user_id, e);
                self.cache.route_rules(user_id).unwrap_or_default()
            }
        }
    }

    pub async fn set(&self, user_id: &str, routes: Vec<RouteRule>) -> SyncOutcome {
        let remote = with_deadline(
            self.request_timeout,
            self.store.store_routes(user_id, routes.clone()),
        )
        .await;

        self.cache.set_route_rules(user_id, &routes);

        match remote {
            Ok(_) => {
                debug!("Saved {} route rules for {}", routes.len(), user_id);
                SyncOutcome::Synced
            }
            Err(e) => {
                warn!("Route permission save failed for {}, kept locally: {}", user_id, e);
                SyncOutcome::LocalOnly
            }
        }
    }

    /// Each user gets its own rule list. Not atomic and never rolled back.
    pub async fn bulk_set(&self, permissions: HashMap<UserId, Vec<RouteRule>>) -> SyncOutcome {
        let remote = with_deadline(
            self.request_timeout,
            self.store.store_many(permissions.clone()),
        )
        .await;

        let user_count = permissions.len();
        self.cache.set_route_rules_many(permissions);

        match remote {
            Ok(updated) => {
                debug!("Saved route rules for {} users", updated);
                SyncOutcome::Synced
            }
            Err(e) => {
                warn!(
                    "Bulk route permission save failed for {} users, kept locally: {}",
                    user_count, e
                );
                SyncOutcome::LocalOnly
            }
        }
    }

    pub async fn bulk_get(&self, user_ids: &[UserId]) -> HashMap<UserId, Vec<RouteRule>> {
        let mut fetched = match with_deadline(self.request_timeout, self.store.fetch_many(user_ids)).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(
                    "Bulk route permission fetch failed for {} users, using local cache: {}",
                    user_ids.len(),
                    e
                );
                HashMap::new()
            }
        };

        let synced: Vec<(UserId, Vec<RouteRule>)> = user_ids
            .iter()
            .filter_map(|id| fetched.get(id).map(|routes| (id.clone(), routes.clone())))
            .collect();
        if !synced.is_empty() {
            self.cache.set_route_rules_many(synced);
        }

        user_ids
            .iter()
            .map(|id| {
                let routes = fetched
                    .remove(id)
                    .or_else(|| self.cache.route_rules(id))
                    .unwrap_or_default();
                (id.clone(), routes)
            })
            .collect()
    }

    /// Loads the user's rules (backend, then cache) and checks one request.
    pub async fn check(&self, user_id: &str, path: &str, method: RouteMethod) -> bool {
        let rules = self.get(user_id).await;
        is_authorized(&rules, path, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::repositories::{MemoryKeyValueStore, MockRoutePermissionStore};

    fn service(store: MockRoutePermissionStore) -> (RoutePermissionService, Arc<LocalCache>) {
        let cache = Arc::new(LocalCache::new(Arc::new(MemoryKeyValueStore::new())));
        let service = RoutePermissionService::new(Arc::new(store), cache.clone(), Duration::from_millis(200));
        (service, cache)
    }

    fn offline() -> DomainError {
        DomainError::BackendStatus {
            status: 503,
            message: "maintenance".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_writes_through() {
        let mut store = MockRoutePermissionStore::new();
        store
            .expect_fetch_routes()
            .returning(|_| Ok(vec![RouteRule::allow_all("/users")]));

        let (service, cache) = service(store);
        let rules = service.get("u1").await;

        assert_eq!(rules, vec![RouteRule::allow_all("/users")]);
        assert_eq!(cache.route_rules("u1"), Some(rules));
    }

    #[tokio::test]
    async fn test_unknown_user_offline_has_no_rules() {
        let mut store = MockRoutePermissionStore::new();
        store.expect_fetch_routes().returning(|_| Err(offline()));

        let (service, _) = service(store);
        assert!(service.get("ghost").await.is_empty());
        assert!(!service.check("ghost", "/users", RouteMethod::Get).await);
    }

    #[tokio::test]
    async fn test_set_offline_then_check() {
        let mut store = MockRoutePermissionStore::new();
        store.expect_store_routes().returning(|_, _| Err(offline()));
        store.expect_fetch_routes().returning(|_| Err(offline()));

        let (service, _) = service(store);
        let outcome = service
            .set("u1", vec![RouteRule::new("/users/:id", [RouteMethod::Get])])
            .await;

        assert_eq!(outcome, SyncOutcome::LocalOnly);
        assert!(service.check("u1", "/users/42", RouteMethod::Get).await);
        assert!(!service.check("u1", "/users/42", RouteMethod::Post).await);
    }

    #[tokio::test]
    async fn test_bulk_set_and_bulk_get() {
        let mut store = MockRoutePermissionStore::new();
        store
            .expect_store_many()
            .times(1)
            .returning(|permissions| Ok(permissions.len()));
        store.expect_fetch_many().returning(|_| Err(offline()));

        let (service, _) = service(store);
        let permissions = HashMap::from([
            ("u1".to_string(), vec![RouteRule::allow_all("/timesheets")]),
            ("u2".to_string(), vec![]),
        ]);
        assert!(service.bulk_set(permissions).await.is_synced());

        let users = vec!["u1".to_string(), "u2".to_string(), "u3".to_string()];
        let result = service.bulk_get(&users).await;

        assert_eq!(result["u1"], vec![RouteRule::allow_all("/timesheets")]);
        assert!(result["u2"].is_empty());
        assert!(result["u3"].is_empty());
    }
}
