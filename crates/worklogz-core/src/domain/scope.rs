// ============================================================================
// Worklogz Core - Scope
// File: crates/worklogz-core/src/domain/scope.rs
// Description: Portal an access entry or menu tree belongs to
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::access::AccessPaths;
use crate::error::DomainError;

/// Portal a sidebar access entry or a menu tree applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Admin,
    Employee,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Admin, Scope::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Admin => "admin",
            Scope::Employee => "employee",
        }
    }

    /// Paths used when neither the backend nor the cache know the user:
    /// admins start with everything disabled, employees unrestricted.
    pub fn default_paths(&self) -> AccessPaths {
        match self {
            Scope::Admin => Some(Vec::new()),
            Scope::Employee => None,
        }
    }

    /// Whether an empty allow-list means "unrestricted" in this scope.
    ///
    /// Employees keep the legacy default-open reading of `[]`; for admins an
    /// empty list disables everything. The two readings are intentionally
    /// not unified so that stored entries keep their meaning.
    pub fn empty_list_is_unrestricted(&self) -> bool {
        matches!(self, Scope::Employee)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Scope::Admin),
            "employee" => Ok(Scope::Employee),
            _ => Err(DomainError::InvalidScope(s.to_string())),
        }
    }
}
