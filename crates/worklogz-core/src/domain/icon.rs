//! Icon name lookup.
//!
//! Menu items carry icon names; the registry resolves them once against a
//! fixed list. Unknown names resolve to no icon.

use std::collections::HashMap;

const KNOWN_ICONS: &[&str] = &[
    "home",
    "dashboard",
    "calendar",
    "clock",
    "plane",
    "clipboard",
    "pipeline",
    "ticket",
    "wallet",
    "users",
    "chart",
    "bell",
    "settings",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconHandle {
    pub id: u16,
    pub name: &'static str,
}

#[derive(Debug, Clone)]
pub struct IconRegistry {
    icons: HashMap<&'static str, IconHandle>,
}

impl IconRegistry {
    pub fn standard() -> Self {
        let icons = KNOWN_ICONS
            .iter()
            .enumerate()
            .map(|(id, name)| (*name, IconHandle { id: id as u16, name: *name }))
            .collect();
        Self { icons }
    }

    pub fn resolve(&self, name: Option<&str>) -> Option<IconHandle> {
        let name = name?.trim();
        self.icons.get(name.to_lowercase().as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let registry = IconRegistry::standard();
        assert_eq!(registry.len(), KNOWN_ICONS.len());

        let home = registry.resolve(Some("Home")).unwrap();
        assert_eq!(home.name, "home");

        assert!(registry.resolve(Some("spaceship")).is_none());
        assert!(registry.resolve(None).is_none());
    }
}
