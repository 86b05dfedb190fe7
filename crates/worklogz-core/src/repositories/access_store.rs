//! Sidebar access store trait (port)

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{AccessPaths, Scope, UserId};
use crate::error::DomainError;

/// Backend of record for sidebar access.
///
/// Stores answer unknown users with [`Scope::default_paths`] and replace
/// paths wholesale on write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn fetch_paths(&self, user_id: &str, scope: Scope) -> Result<AccessPaths, DomainError>;

    async fn store_paths(
        &self,
        user_id: &str,
        scope: Scope,
        paths: AccessPaths,
    ) -> Result<AccessPaths, DomainError>;

    async fn fetch_many(
        &self,
        user_ids: &[UserId],
        scope: Scope,
    ) -> Result<HashMap<UserId, AccessPaths>, DomainError>;

    /// Not atomic: a failure part way leaves earlier users updated.
    async fn store_many(
        &self,
        user_ids: &[UserId],
        scope: Scope,
        paths: AccessPaths,
    ) -> Result<usize, DomainError>;
}
