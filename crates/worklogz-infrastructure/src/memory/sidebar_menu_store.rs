// ============================================================================
// Worklogz Infrastructure - In-Memory Sidebar Menu Store
// File: crates/worklogz-infrastructure/src/memory/sidebar_menu_store.rs
// ============================================================================

use async_trait::async_trait;
use dashmap::DashMap;

use worklogz_core::domain::default_menu::default_menu;
use worklogz_core::domain::{MenuItem, Scope};
use worklogz_core::error::DomainError;
use worklogz_core::repositories::SidebarMenuStore;

#[derive(Default)]
pub struct MemorySidebarMenuStore {
    menus: DashMap<Scope, Vec<MenuItem>>,
}

impl MemorySidebarMenuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SidebarMenuStore for MemorySidebarMenuStore {
    async fn fetch_menu(&self, scope: Scope) -> Result<Vec<MenuItem>, DomainError> {
        Ok(self
            .menus
            .get(&scope)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| default_menu(scope)))
    }

    async fn store_menu(&self, scope: Scope, items: Vec<MenuItem>) -> Result<Vec<MenuItem>, DomainError> {
        self.menus.insert(scope, items.clone());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_until_saved() {
        let store = MemorySidebarMenuStore::new();
        assert_eq!(store.fetch_menu(Scope::Admin).await.unwrap(), default_menu(Scope::Admin));

        let custom = vec![MenuItem::leaf("Home", "/home", Some("home"))];
        store.store_menu(Scope::Admin, custom.clone()).await.unwrap();
        assert_eq!(store.fetch_menu(Scope::Admin).await.unwrap(), custom);
        assert_eq!(store.fetch_menu(Scope::Employee).await.unwrap(), default_menu(Scope::Employee));
    }
}
