// ============================================================================
// Worklogz Infrastructure - In-Memory Route Permission Store
// File: crates/worklogz-infrastructure/src/memory/route_permission_store.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use worklogz_core::domain::{RouteRule, UserId};
use worklogz_core::error::DomainError;
use worklogz_core::repositories::RoutePermissionStore;

#[derive(Default)]
pub struct MemoryRoutePermissionStore {
    rules: DashMap<UserId, Vec<RouteRule>>,
}

impl MemoryRoutePermissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoutePermissionStore for MemoryRoutePermissionStore {
    async fn fetch_routes(&self, user_id: &str) -> Result<Vec<RouteRule>, DomainError> {
        Ok(self
            .rules
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn store_routes(&self, user_id: &str, routes: Vec<RouteRule>) -> Result<Vec<RouteRule>, DomainError> {
        self.rules.insert(user_id.to_string(), routes.clone());
        Ok(routes)
    }

    async fn fetch_many(&self, user_ids: &[UserId]) -> Result<HashMap<UserId, Vec<RouteRule>>, DomainError> {
        Ok(user_ids
            .iter()
            .map(|id| {
                let routes = self.rules.get(id).map(|e| e.value().clone()).unwrap_or_default();
                (id.clone(), routes)
            })
            .collect())
    }

    async fn store_many(&self, permissions: HashMap<UserId, Vec<RouteRule>>) -> Result<usize, DomainError> {
        let count = permissions.len();
        for (user_id, routes) in permissions {
            self.rules.insert(user_id, routes);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklogz_core::domain::RouteMethod;

    #[tokio::test]
    async fn test_store_and_fetch() {
        let store = MemoryRoutePermissionStore::new();
        assert!(store.fetch_routes("u1").await.unwrap().is_empty());

        let rules = vec![RouteRule::new("/users/:id", [RouteMethod::Get])];
        store.store_routes("u1", rules.clone()).await.unwrap();

        let map = store
            .fetch_many(&["u1".to_string(), "u2".to_string()])
            .await
            .unwrap();
        assert_eq!(map["u1"], rules);
        assert!(map["u2"].is_empty());
    }
}
