// ============================================================================
// Worklogz Infrastructure - In-Memory Sidebar Access Store
// File: crates/worklogz-infrastructure/src/memory/access_store.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use worklogz_core::domain::{AccessPaths, Scope, UserId};
use worklogz_core::error::DomainError;
use worklogz_core::repositories::AccessStore;

/// Users without an entry are answered with the scope default.
#[derive(Default)]
pub struct MemoryAccessStore {
    entries: DashMap<(Scope, UserId), AccessPaths>,
}

impl MemoryAccessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, user_id: &str, scope: Scope) -> AccessPaths {
        self.entries
            .get(&(scope, user_id.to_string()))
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| scope.default_paths())
    }
}

#[async_trait]
impl AccessStore for MemoryAccessStore {
    async fn fetch_paths(&self, user_id: &str, scope: Scope) -> Result<AccessPaths, DomainError> {
        Ok(self.lookup(user_id, scope))
    }

    async fn store_paths(&self, user_id: &str, scope: Scope, paths: AccessPaths) -> Result<AccessPaths, DomainError> {
        self.entries.insert((scope, user_id.to_string()), paths.clone());
        Ok(paths)
    }

    async fn fetch_many(&self, user_ids: &[UserId], scope: Scope) -> Result<HashMap<UserId, AccessPaths>, DomainError> {
        Ok(user_ids
            .iter()
            .map(|id| (id.clone(), self.lookup(id, scope)))
            .collect())
    }

    async fn store_many(&self, user_ids: &[UserId], scope: Scope, paths: AccessPaths) -> Result<usize, DomainError> {
        for user_id in user_ids {
            self.entries.insert((scope, user_id.clone()), paths.clone());
        }
        Ok(user_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_entries_use_scope_default() {
        let store = MemoryAccessStore::new();
        assert_eq!(store.fetch_paths("u1", Scope::Admin).await.unwrap(), Some(vec![]));
        assert_eq!(store.fetch_paths("u1", Scope::Employee).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scopes_are_independent() {
        let store = MemoryAccessStore::new();
        let users = vec!["u1".to_string(), "u2".to_string()];

        let updated = store
            .store_many(&users, Scope::Employee, Some(vec!["/payroll".to_string()]))
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let employee = store.fetch_many(&users, Scope::Employee).await.unwrap();
        assert_eq!(employee["u2"], Some(vec!["/payroll".to_string()]));
        assert_eq!(store.fetch_paths("u2", Scope::Admin).await.unwrap(), Some(vec![]));
    }
}
