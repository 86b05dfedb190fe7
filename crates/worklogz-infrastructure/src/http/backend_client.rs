// ============================================================================
// Worklogz Infrastructure - Backend HTTP Client
// File: crates/worklogz-infrastructure/src/http/backend_client.rs
// ============================================================================
//! reqwest client for the access REST API. Implements every core store port
//! so the sync facades can run against a remote backend.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use worklogz_core::domain::{AccessPaths, MenuItem, RouteRule, Scope, UserId};
use worklogz_core::dto::{
    AccessPathsBody, BulkAccessBody, BulkUpdateAccessRequest, MenuBody, PermissionsMapBody,
    RoutesBody, UpdateAccessRequest, UpdatedBody,
};
use worklogz_core::error::DomainError;
use worklogz_core::repositories::{AccessStore, RoutePermissionStore, SidebarMenuStore};
use worklogz_shared::config::BackendSettings;
use worklogz_shared::utils::join_user_ids;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    code: String,
    message: String,
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::InternalError(format!("invalid backend url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::InternalError(format!(
                "backend url {} cannot be a base",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn from_settings(settings: &BackendSettings) -> Result<Self, DomainError> {
        Self::new(
            &settings.base_url,
            settings.token.clone(),
            Duration::from_millis(settings.request_timeout_ms),
        )
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::NetworkError(format!("request timed out: {}", e))
            } else {
                DomainError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        debug!("Backend {} {}", status.as_u16(), response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|error| format!("{}: {}", error.code, error.message))
                .unwrap_or(body);
            return Err(DomainError::BackendStatus {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| DomainError::DecodeError(e.to_string()))?;

        if !envelope.success {
            let message = envelope
                .error
                .map(|error| format!("{}: {}", error.code, error.message))
                .unwrap_or_else(|| "request not successful".to_string());
            return Err(DomainError::BackendStatus {
                status: status.as_u16(),
                message,
            });
        }

        envelope
            .data
            .ok_or_else(|| DomainError::DecodeError("response has no data".to_string()))
    }
}

#[async_trait]
impl AccessStore for BackendClient {
    async fn fetch_paths(&self, user_id: &str, scope: Scope) -> Result<AccessPaths, DomainError> {
        let mut url = self.endpoint(&["sidebar-access", user_id]);
        url.query_pairs_mut().append_pair("scope", scope.as_str());

        let body: AccessPathsBody = self.send(self.client.get(url)).await?;
        Ok(body.paths)
    }

    async fn store_paths(&self, user_id: &str, scope: Scope, paths: AccessPaths) -> Result<AccessPaths, DomainError> {
        let url = self.endpoint(&["sidebar-access", user_id]);
        let request = UpdateAccessRequest { paths, scope };

        let body: AccessPathsBody = self.send(self.client.put(url).json(&request)).await?;
        Ok(body.paths)
    }

    async fn fetch_many(&self, user_ids: &[UserId], scope: Scope) -> Result<HashMap<UserId, AccessPaths>, DomainError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut url = self.endpoint(&["sidebar-access", "bulk"]);
        url.query_pairs_mut()
            .append_pair("userIds", &join_user_ids(user_ids))
            .append_pair("scope", scope.as_str());

        let body: BulkAccessBody = self.send(self.client.get(url)).await?;
        Ok(body.access)
    }

    async fn store_many(&self, user_ids: &[UserId], scope: Scope, paths: AccessPaths) -> Result<usize, DomainError> {
        let url = self.endpoint(&["sidebar-access", "bulk"]);
        let request = BulkUpdateAccessRequest {
            user_ids: user_ids.to_vec(),
            paths,
            scope,
        };

        let body: UpdatedBody = self.send(self.client.put(url).json(&request)).await?;
        Ok(body.updated)
    }
}

#[async_trait]
impl RoutePermissionStore for BackendClient {
    async fn fetch_routes(&self, user_id: &str) -> Result<Vec<RouteRule>, DomainError> {
        let url = self.endpoint(&["route-permissions", user_id]);
        let body: RoutesBody = self.send(self.client.get(url)).await?;
        Ok(body.routes)
    }

    async fn store_routes(&self, user_id: &str, routes: Vec<RouteRule>) -> Result<Vec<RouteRule>, DomainError> {
        let url = self.endpoint(&["route-permissions", user_id]);
        let request = RoutesBody { routes };

        let body: RoutesBody = self.send(self.client.put(url).json(&request)).await?;
        Ok(body.routes)
    }

    async fn fetch_many(&self, user_ids: &[UserId]) -> Result<HashMap<UserId, Vec<RouteRule>>, DomainError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut url = self.endpoint(&["route-permissions", "bulk"]);
        url.query_pairs_mut().append_pair("userIds", &join_user_ids(user_ids));

        let body: PermissionsMapBody = self.send(self.client.get(url)).await?;
        Ok(body.permissions_map)
    }

    async fn store_many(&self, permissions: HashMap<UserId, Vec<RouteRule>>) -> Result<usize, DomainError> {
        let url = self.endpoint(&["route-permissions", "bulk"]);
        let request = PermissionsMapBody {
            permissions_map: permissions,
        };

        let body: UpdatedBody = self.send(self.client.put(url).json(&request)).await?;
        Ok(body.updated)
    }
}

#[async_trait]
impl SidebarMenuStore for BackendClient {
    async fn fetch_menu(&self, scope: Scope) -> Result<Vec<MenuItem>, DomainError> {
        let url = self.endpoint(&["sidebar-menu", scope.as_str()]);
        let body: MenuBody = self.send(self.client.get(url)).await?;
        Ok(body.items)
    }

    async fn store_menu(&self, scope: Scope, items: Vec<MenuItem>) -> Result<Vec<MenuItem>, DomainError> {
        let url = self.endpoint(&["sidebar-menu", scope.as_str()]);
        let request = MenuBody { items };

        let body: MenuBody = self.send(self.client.put(url).json(&request)).await?;
        Ok(body.items)
    }
}
