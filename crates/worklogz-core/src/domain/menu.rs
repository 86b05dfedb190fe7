// ============================================================================
// Worklogz Core - Sidebar Menu
// File: crates/worklogz-core/src/domain/menu.rs
// Description: Sidebar menu tree owned by the backend per scope
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;

/// Top-level sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[validate(length(min = 1, max = 100, message = "Menu label must be between 1 and 100 characters"))]
    pub label: String,

    /// Icon name, resolved through [`crate::domain::IconRegistry`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    #[serde(default)]
    pub sub_items: Vec<SubItem>,
}

/// Nested sidebar entry; sections are non-clickable headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubItem {
    #[validate(length(min = 1, max = 100, message = "Menu label must be between 1 and 100 characters"))]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    #[serde(default)]
    pub is_section: bool,
}

impl MenuItem {
    pub fn leaf(label: impl Into<String>, path: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            label: label.into(),
            icon: icon.map(str::to_string),
            path: Some(path.into()),
            order: None,
            sub_items: Vec::new(),
        }
    }

    pub fn group(label: impl Into<String>, icon: Option<&str>, sub_items: Vec<SubItem>) -> Self {
        Self {
            label: label.into(),
            icon: icon.map(str::to_string),
            path: None,
            order: None,
            sub_items,
        }
    }

    pub fn has_sub_items(&self) -> bool {
        !self.sub_items.is_empty()
    }

    /// Paths of the clickable sub-items, sections excluded.
    pub fn navigable_sub_paths(&self) -> impl Iterator<Item = &str> {
        self.sub_items
            .iter()
            .filter(|sub| !sub.is_section)
            .filter_map(|sub| sub.path.as_deref())
    }
}

impl SubItem {
    pub fn link(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            path: Some(path.into()),
            order: None,
            is_section: false,
        }
    }

    pub fn section(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            path: None,
            order: None,
            is_section: true,
        }
    }
}

const MAX_PATH_LENGTH: usize = 255;

fn check_path(label: &str, path: Option<&str>) -> Result<(), DomainError> {
    let Some(path) = path else {
        return Ok(());
    };
    if !path.starts_with('/') {
        return Err(DomainError::ValidationError(format!(
            "Menu path for '{}' must start with '/': {}",
            label, path
        )));
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(DomainError::ValidationError(format!(
            "Menu path for '{}' too long",
            label
        )));
    }
    Ok(())
}

/// Validates a menu tree before it is persisted.
pub fn validate_menu(items: &[MenuItem]) -> Result<(), DomainError> {
    for item in items {
        item.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        check_path(&item.label, item.path.as_deref())?;

        for sub in &item.sub_items {
            sub.validate()
                .map_err(|e| DomainError::ValidationError(e.to_string()))?;
            check_path(&sub.label, sub.path.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_camel_case() {
        let item: MenuItem = serde_json::from_str(
            r#"{"label":"Attendance","subItems":[{"label":"Daily","isSection":true},{"label":"Log","path":"/attendance/log","order":2}]}"#,
        )
        .unwrap();

        assert!(item.path.is_none());
        assert!(item.sub_items[0].is_section);
        assert_eq!(item.sub_items[1].order, Some(2));
        assert_eq!(item.navigable_sub_paths().collect::<Vec<_>>(), vec!["/attendance/log"]);
    }

    #[test]
    fn test_validate_menu() {
        let valid = vec![MenuItem::leaf("Home", "/home", Some("home"))];
        assert!(validate_menu(&valid).is_ok());

        let empty_label = vec![MenuItem::leaf("", "/home", None)];
        assert!(matches!(validate_menu(&empty_label), Err(DomainError::ValidationError(_))));

        let relative = vec![MenuItem::group(
            "Leave",
            None,
            vec![SubItem::link("Requests", "leave/requests")],
        )];
        assert!(matches!(validate_menu(&relative), Err(DomainError::ValidationError(_))));
    }
}
