// ============================================================================
// Worklogz Core - Sidebar Menu Service
// File: crates/worklogz-core/src/services/menu_service.rs
// ============================================================================
//! Loads and saves the per-scope menu tree and produces the sidebar a user
//! actually sees.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::default_menu::default_menu;
use crate::domain::{validate_menu, IconHandle, IconRegistry, MenuItem, Scope};
use crate::error::DomainError;
use crate::repositories::SidebarMenuStore;
use crate::services::access_sync_service::AccessSyncService;
use crate::services::local_cache::LocalCache;
use crate::services::menu_filter::{filter, normalize_order};
use crate::services::{with_deadline, SyncOutcome};

pub struct MenuService {
    store: Arc<dyn SidebarMenuStore>,
    cache: Arc<LocalCache>,
    access: Arc<AccessSyncService>,
    icons: IconRegistry,
    request_timeout: Duration,
}

impl MenuService {
    pub fn new(
        store: Arc<dyn SidebarMenuStore>,
        cache: Arc<LocalCache>,
        access: Arc<AccessSyncService>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            access,
            icons: IconRegistry::standard(),
            request_timeout,
        }
    }

    /// Backend tree, else cached tree, else the built-in menu for `scope`.
    pub async fn load(&self, scope: Scope) -> Vec<MenuItem> {
        match with_deadline(self.request_timeout, self.store.fetch_menu(scope)).await {
            Ok(items) => {
                let items = normalize_order(items);
                debug!("Fetched {} menu with {} items", scope, items.len());
                self.cache.set_menu(scope, &items);
                items
            }
            Err(e) => {
                warn!("Sidebar menu fetch failed for {}, using local cache: {}", scope, e);
                self.cache
                    .menu(scope)
                    .unwrap_or_else(|| normalize_order(default_menu(scope)))
            }
        }
    }

    /// Rejects invalid trees before anything is written. Remote failures
    /// only downgrade the outcome.
    pub async fn save(&self, scope: Scope, items: Vec<MenuItem>) -> Result<SyncOutcome, DomainError> {
        validate_menu(&items)?;
        let items = normalize_order(items);

        let remote = with_deadline(
            self.request_timeout,
            self.store.store_menu(scope, items.clone()),
        )
        .await;

        self.cache.set_menu(scope, &items);

        match remote {
            Ok(_) => {
                debug!("Saved {} menu with {} items", scope, items.len());
                Ok(SyncOutcome::Synced)
            }
            Err(e) => {
                warn!("Sidebar menu save failed for {}, kept locally: {}", scope, e);
                Ok(SyncOutcome::LocalOnly)
            }
        }
    }

    /// The scope's menu pruned to the user's sidebar access.
    pub async fn visible_menu(&self, user_id: &str, scope: Scope) -> Vec<MenuItem> {
        let menu = self.load(scope).await;
        let paths = self.access.get(user_id, scope).await;
        filter(&menu, paths.as_deref(), scope)
    }

    pub fn icon(&self, item: &MenuItem) -> Option<IconHandle> {
        self.icons.resolve(item.icon.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubItem;
    use crate::repositories::{MemoryKeyValueStore, MockAccessStore, MockSidebarMenuStore};

    fn offline() -> DomainError {
        DomainError::NetworkError("connection reset".to_string())
    }

    fn build(menu_store: MockSidebarMenuStore, access_store: MockAccessStore) -> MenuService {
        let timeout = Duration::from_millis(200);
        let cache = Arc::new(LocalCache::new(Arc::new(MemoryKeyValueStore::new())));
        let access = Arc::new(AccessSyncService::new(Arc::new(access_store), cache.clone(), timeout));
        MenuService::new(Arc::new(menu_store), cache, access, timeout)
    }

    fn scenario_menu() -> Vec<MenuItem> {
        vec![
            MenuItem::leaf("Reports", "/reports", Some("chart")),
            MenuItem::leaf("Payroll", "/payroll", Some("wallet")),
            MenuItem::leaf("Home", "/home", Some("home")),
        ]
    }

    #[tokio::test]
    async fn test_load_offline_without_cache_uses_default_menu() {
        let mut menu_store = MockSidebarMenuStore::new();
        menu_store.expect_fetch_menu().returning(|_| Err(offline()));

        let service = build(menu_store, MockAccessStore::new());
        let items = service.load(Scope::Employee).await;

        assert_eq!(items[0].path.as_deref(), Some("/home"));
        assert_eq!(items.len(), default_menu(Scope::Employee).len());
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_menu() {
        let mut menu_store = MockSidebarMenuStore::new();
        menu_store.expect_store_menu().never();

        let service = build(menu_store, MockAccessStore::new());
        let invalid = vec![MenuItem::group("Leave", None, vec![SubItem::link("Requests", "leave")])];

        let result = service.save(Scope::Admin, invalid).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_save_offline_then_load_from_cache() {
        let mut menu_store = MockSidebarMenuStore::new();
        menu_store.expect_store_menu().returning(|_, _| Err(offline()));
        menu_store.expect_fetch_menu().returning(|_| Err(offline()));

        let service = build(menu_store, MockAccessStore::new());
        let outcome = service.save(Scope::Admin, scenario_menu()).await.unwrap();
        assert_eq!(outcome, SyncOutcome::LocalOnly);

        let loaded = service.load(Scope::Admin).await;
        let labels: Vec<&str> = loaded.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Reports", "Payroll", "Home"]);
        assert_eq!(loaded[2].order, Some(2));
    }

    #[tokio::test]
    async fn test_visible_menu_for_employee_puts_home_first() {
        let mut menu_store = MockSidebarMenuStore::new();
        menu_store.expect_fetch_menu().returning(|_| Ok(scenario_menu()));
        let mut access_store = MockAccessStore::new();
        access_store
            .expect_fetch_paths()
            .returning(|_, _| Ok(Some(vec!["/home".to_string(), "/payroll".to_string()])));

        let service = build(menu_store, access_store);
        let visible = service.visible_menu("u1", Scope::Employee).await;

        let paths: Vec<&str> = visible.iter().filter_map(|i| i.path.as_deref()).collect();
        assert_eq!(paths, vec!["/home", "/payroll"]);
    }

    #[tokio::test]
    async fn test_visible_menu_after_admin_bulk_set_is_empty() {
        let mut menu_store = MockSidebarMenuStore::new();
        menu_store.expect_fetch_menu().returning(|_| Ok(scenario_menu()));
        let mut access_store = MockAccessStore::new();
        access_store.expect_store_many().returning(|_, _, _| Err(offline()));
        access_store.expect_fetch_paths().returning(|_, _| Err(offline()));

        let service = build(menu_store, access_store);
        let users = vec!["u1".to_string(), "u2".to_string()];
        service.access.bulk_set(&users, Scope::Admin, Some(vec![])).await;

        for user in &users {
            assert_eq!(service.access.get(user, Scope::Admin).await, Some(vec![]));
            assert!(service.visible_menu(user, Scope::Admin).await.is_empty());
        }
    }

    #[test]
    fn test_icon_resolution() {
        let service = build(MockSidebarMenuStore::new(), MockAccessStore::new());
        let items = scenario_menu();

        assert_eq!(service.icon(&items[1]).map(|i| i.name), Some("wallet"));
        assert!(service.icon(&MenuItem::leaf("X", "/x", Some("unknown"))).is_none());
    }
}
