//! Sidebar menu store trait (port)

use async_trait::async_trait;

use crate::domain::{MenuItem, Scope};
use crate::error::DomainError;

/// Canonical menu tree per scope. Stores fall back to
/// [`crate::domain::default_menu::default_menu`] until a tree is saved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SidebarMenuStore: Send + Sync {
    async fn fetch_menu(&self, scope: Scope) -> Result<Vec<MenuItem>, DomainError>;

    async fn store_menu(&self, scope: Scope, items: Vec<MenuItem>) -> Result<Vec<MenuItem>, DomainError>;
}
