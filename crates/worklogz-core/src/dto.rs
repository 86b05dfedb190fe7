//! Request and response bodies of the access REST contract.
//!
//! Shared by the HTTP backend client and the axum handlers so both sides
//! agree on field names (camelCase on the wire).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AccessPaths, MenuItem, RouteRule, Scope, UserId};

/// `paths` is always serialized, `null` included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPathsBody {
    pub paths: AccessPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessQuery {
    pub scope: Scope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccessRequest {
    pub paths: AccessPaths,
    pub scope: Scope,
}

/// `userIds` is the comma joined id list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAccessQuery {
    pub user_ids: String,
    pub scope: Scope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateAccessRequest {
    pub user_ids: Vec<UserId>,
    pub paths: AccessPaths,
    pub scope: Scope,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkAccessBody {
    pub access: HashMap<UserId, AccessPaths>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutesBody {
    pub routes: Vec<RouteRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRoutesQuery {
    pub user_ids: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsMapBody {
    pub permissions_map: HashMap<UserId, Vec<RouteRule>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuBody {
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedBody {
    pub updated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_paths_serialized() {
        let body = AccessPathsBody { paths: None };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "paths": null }));
    }

    #[test]
    fn test_bulk_update_request_field_names() {
        let request: BulkUpdateAccessRequest = serde_json::from_value(json!({
            "userIds": ["u1", "u2"],
            "paths": [],
            "scope": "admin"
        }))
        .unwrap();

        assert_eq!(request.user_ids, vec!["u1".to_string(), "u2".to_string()]);
        assert_eq!(request.paths, Some(vec![]));
        assert_eq!(request.scope, Scope::Admin);
    }

    #[test]
    fn test_permissions_map_field_name() {
        let body: PermissionsMapBody = serde_json::from_value(json!({
            "permissionsMap": { "u1": [{ "path": "/users", "methods": ["ALL"] }] }
        }))
        .unwrap();
        assert_eq!(body.permissions_map["u1"].len(), 1);
    }
}
