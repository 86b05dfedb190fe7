//! Route permission store trait (port)

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{RouteRule, UserId};
use crate::error::DomainError;

/// Backend of record for route permissions. Unknown users have no rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutePermissionStore: Send + Sync {
    async fn fetch_routes(&self, user_id: &str) -> Result<Vec<RouteRule>, DomainError>;

    async fn store_routes(
        &self,
        user_id: &str,
        routes: Vec<RouteRule>,
    ) -> Result<Vec<RouteRule>, DomainError>;

    async fn fetch_many(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, Vec<RouteRule>>, DomainError>;

    async fn store_many(
        &self,
        permissions: HashMap<UserId, Vec<RouteRule>>,
    ) -> Result<usize, DomainError>;
}
