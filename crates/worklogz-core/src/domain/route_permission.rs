// ============================================================================
// Worklogz Core - Route Permission Entry
// File: crates/worklogz-core/src/domain/route_permission.rs
// Description: Per-user API route rules and the authorization matcher
// ============================================================================
//! Route rules decide which API paths and verbs a user may call.
//!
//! A request is authorized when any rule matches its path (exact,
//! `:param` segment, or `/`-prefix match), the rule is not explicitly
//! disallowed, and the rule lists `ALL` or the request verb. Rules are
//! OR-ed: there is no precedence between match kinds, so a disallowed rule
//! never revokes what another rule grants.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::access::UserId;
use crate::error::DomainError;

/// HTTP verb a rule applies to, or `ALL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RouteMethod {
    All,
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl RouteMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMethod::All => "ALL",
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Patch => "PATCH",
            RouteMethod::Delete => "DELETE",
            RouteMethod::Head => "HEAD",
            RouteMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" | "*" => Ok(RouteMethod::All),
            "GET" => Ok(RouteMethod::Get),
            "POST" => Ok(RouteMethod::Post),
            "PUT" => Ok(RouteMethod::Put),
            "PATCH" => Ok(RouteMethod::Patch),
            "DELETE" => Ok(RouteMethod::Delete),
            "HEAD" => Ok(RouteMethod::Head),
            "OPTIONS" => Ok(RouteMethod::Options),
            _ => Err(DomainError::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for RouteMethod {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RouteMethod> for String {
    fn from(method: RouteMethod) -> Self {
        method.as_str().to_string()
    }
}

fn default_allowed() -> bool {
    true
}

/// Single path rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub path: String,
    pub methods: BTreeSet<RouteMethod>,
    #[serde(default = "default_allowed")]
    pub allowed: bool,
}

impl RouteRule {
    pub fn new(path: impl Into<String>, methods: impl IntoIterator<Item = RouteMethod>) -> Self {
        Self {
            path: path.into(),
            methods: methods.into_iter().collect(),
            allowed: true,
        }
    }

    pub fn allow_all(path: impl Into<String>) -> Self {
        Self::new(path, [RouteMethod::All])
    }

    pub fn denied(mut self) -> Self {
        self.allowed = false;
        self
    }

    pub fn matches_path(&self, path: &str) -> bool {
        self.path == path || matches_parameterized(&self.path, path) || matches_prefix(&self.path, path)
    }

    pub fn permits_method(&self, method: RouteMethod) -> bool {
        self.methods.contains(&RouteMethod::All) || self.methods.contains(&method)
    }

    /// Whether this rule on its own authorizes the request.
    pub fn grants(&self, path: &str, method: RouteMethod) -> bool {
        self.allowed && self.matches_path(path) && self.permits_method(method)
    }
}

/// `/users/:id` matches `/users/42`: same segment count, `:name` segments
/// accept any single non-empty segment, the rest compare literally.
fn matches_parameterized(pattern: &str, path: &str) -> bool {
    if !pattern.contains(':') {
        return false;
    }

    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();

    if pattern_segments.len() != path_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(path_segments.iter())
        .all(|(expected, actual)| {
            if expected.starts_with(':') {
                !actual.is_empty()
            } else {
                expected == actual
            }
        })
}

/// `/users` covers `/users` and everything below `/users/`.
fn matches_prefix(rule_path: &str, path: &str) -> bool {
    if path == rule_path {
        return true;
    }
    path.strip_prefix(rule_path)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

/// Pure authorization check over a user's rules.
///
/// Returns `false` for an empty rule list or when no rule grants access.
pub fn is_authorized(rules: &[RouteRule], path: &str, method: RouteMethod) -> bool {
    rules.iter().any(|rule| rule.grants(path, method))
}

/// All route rules of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePermissionEntry {
    pub user_id: UserId,
    pub routes: Vec<RouteRule>,
}

impl RoutePermissionEntry {
    pub fn new(user_id: impl Into<UserId>, routes: Vec<RouteRule>) -> Self {
        Self {
            user_id: user_id.into(),
            routes,
        }
    }

    pub fn is_authorized(&self, path: &str, method: RouteMethod) -> bool {
        is_authorized(&self.routes, path, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rules_deny_everything() {
        assert!(!is_authorized(&[], "/users", RouteMethod::Get));
        assert!(!is_authorized(&[], "/", RouteMethod::All));
    }

    #[test]
    fn test_parameterized_rule() {
        let rules = vec![RouteRule::new("/users/:id", [RouteMethod::Get])];

        assert!(is_authorized(&rules, "/users/42", RouteMethod::Get));
        assert!(!is_authorized(&rules, "/users/42", RouteMethod::Post));
        assert!(!is_authorized(&rules, "/users/", RouteMethod::Get));
        assert!(!is_authorized(&rules, "/users/42/edit", RouteMethod::Get));
    }

    #[test]
    fn test_prefix_rule_any_method() {
        let rules = vec![RouteRule::allow_all("/users")];

        assert!(is_authorized(&rules, "/users", RouteMethod::Delete));
        assert!(is_authorized(&rules, "/users/me", RouteMethod::Get));
        assert!(is_authorized(&rules, "/users/me", RouteMethod::Patch));
        assert!(!is_authorized(&rules, "/users-archive", RouteMethod::Get));
    }

    #[test]
    fn test_exact_rule() {
        let rules = vec![RouteRule::new("/payouts", [RouteMethod::Get, RouteMethod::Put])];

        assert!(is_authorized(&rules, "/payouts", RouteMethod::Put));
        assert!(!is_authorized(&rules, "/payouts", RouteMethod::Delete));
        assert!(!is_authorized(&rules, "/leave", RouteMethod::Get));
    }

    #[test]
    fn test_disallowed_rule_does_not_revoke_other_grants() {
        let rules = vec![
            RouteRule::allow_all("/tickets").denied(),
            RouteRule::new("/tickets/:id", [RouteMethod::Get]),
        ];

        assert!(is_authorized(&rules, "/tickets/7", RouteMethod::Get));
        assert!(!is_authorized(&rules, "/tickets", RouteMethod::Get));
    }

    #[test]
    fn test_method_parsing_is_case_insensitive() {
        assert_eq!("get".parse::<RouteMethod>().unwrap(), RouteMethod::Get);
        assert_eq!("All".parse::<RouteMethod>().unwrap(), RouteMethod::All);
        assert!("FETCH".parse::<RouteMethod>().is_err());
    }

    #[test]
    fn test_rule_wire_format() {
        let rule: RouteRule =
            serde_json::from_str(r#"{"path":"/users/:id","methods":["get","ALL"]}"#).unwrap();
        assert!(rule.allowed);
        assert!(rule.methods.contains(&RouteMethod::Get));
        assert!(rule.methods.contains(&RouteMethod::All));

        let json = serde_json::to_value(&RouteRule::new("/leave", [RouteMethod::Post])).unwrap();
        assert_eq!(json["methods"], serde_json::json!(["POST"]));
        assert_eq!(json["allowed"], serde_json::json!(true));
    }
}
