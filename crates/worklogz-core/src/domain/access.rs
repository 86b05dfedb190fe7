// ============================================================================
// Worklogz Core - Sidebar Access Entry
// File: crates/worklogz-core/src/domain/access.rs
// Description: Per-(scope, user) allow-list of navigation paths
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::domain::scope::Scope;

pub type UserId = String;

/// Allowed navigation paths.
///
/// `None` means unrestricted. `Some(vec![])` depends on the scope, see
/// [`Scope::empty_list_is_unrestricted`]. Never normalize one into the other.
pub type AccessPaths = Option<Vec<String>>;

/// Sidebar access entry, at most one per `(scope, user_id)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntry {
    pub scope: Scope,
    pub user_id: UserId,
    pub paths: AccessPaths,
}

impl AccessEntry {
    pub fn new(user_id: impl Into<UserId>, scope: Scope, paths: AccessPaths) -> Self {
        Self {
            scope,
            user_id: user_id.into(),
            paths,
        }
    }

    /// Entry carrying the scope default, used when nothing is stored.
    pub fn default_for(user_id: impl Into<UserId>, scope: Scope) -> Self {
        Self::new(user_id, scope, scope.default_paths())
    }

    /// Whether every navigation target is visible.
    pub fn is_unrestricted(&self) -> bool {
        match &self.paths {
            None => true,
            Some(paths) if paths.is_empty() => self.scope.empty_list_is_unrestricted(),
            Some(_) => false,
        }
    }

    /// Membership test, ignores ordering.
    pub fn allows(&self, path: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        self.paths
            .as_ref()
            .map(|paths| paths.iter().any(|p| p == path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_paths_unrestricted() {
        let entry = AccessEntry::new("u1", Scope::Admin, None);
        assert!(entry.is_unrestricted());
        assert!(entry.allows("/payroll"));
    }

    #[test]
    fn test_empty_paths_depend_on_scope() {
        let employee = AccessEntry::new("u1", Scope::Employee, Some(vec![]));
        let admin = AccessEntry::new("u1", Scope::Admin, Some(vec![]));

        assert!(employee.allows("/payroll"));
        assert!(!admin.allows("/payroll"));
    }

    #[test]
    fn test_allow_list_is_strict() {
        let entry = AccessEntry::new(
            "u1",
            Scope::Employee,
            Some(vec!["/payroll".to_string(), "/home".to_string()]),
        );
        assert!(entry.allows("/home"));
        assert!(!entry.allows("/reports"));
    }

    #[test]
    fn test_default_entry() {
        assert_eq!(AccessEntry::default_for("u1", Scope::Admin).paths, Some(vec![]));
        assert_eq!(AccessEntry::default_for("u1", Scope::Employee).paths, None);
    }
}
