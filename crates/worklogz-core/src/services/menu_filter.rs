// ============================================================================
// Worklogz Core - Menu Filter
// File: crates/worklogz-core/src/services/menu_filter.rs
// ============================================================================
//! Pure functions pruning and ordering a sidebar menu tree.

use std::collections::HashSet;

use crate::domain::{MenuItem, Scope, SubItem};

/// Paths visible to anyone with a non-empty allow-list.
pub const ALWAYS_ALLOWED_PATHS: &[&str] = &[
    "/home",
    "/dashboard",
    "/attendance",
    "/admin/dashboard",
    "/employee/home",
    "/employee/attendance",
];

/// Path of the item pinned to the front of a filtered menu.
pub const PINNED_PATH: &str = "/home";
const PINNED_LABEL: &str = "home";

/// Every navigable path: each item's own path followed by its non-section
/// sub-item paths, first occurrence only.
pub fn get_all_paths(menu: &[MenuItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for item in menu {
        let own = item.path.as_deref().into_iter();
        for path in own.chain(item.navigable_sub_paths()) {
            if seen.insert(path) {
                paths.push(path.to_string());
            }
        }
    }

    paths
}

/// Prunes `menu` to what `allow_list` permits in `scope`.
///
/// `None` leaves the menu untouched. An empty list keeps the whole menu for
/// employees (legacy default-open behaviour) and hides everything for
/// admins; this asymmetry is intentional and must not be unified.
pub fn filter(menu: &[MenuItem], allow_list: Option<&[String]>, scope: Scope) -> Vec<MenuItem> {
    let Some(allow_list) = allow_list else {
        return menu.to_vec();
    };

    if allow_list.is_empty() {
        return if scope.empty_list_is_unrestricted() {
            menu.to_vec()
        } else {
            Vec::new()
        };
    }

    let allowed: HashSet<&str> = allow_list.iter().map(String::as_str).collect();
    let is_allowed = |path: Option<&str>| {
        path.map(|p| allowed.contains(p) || ALWAYS_ALLOWED_PATHS.contains(&p))
            .unwrap_or(false)
    };

    let mut visible: Vec<MenuItem> = menu
        .iter()
        .filter_map(|item| {
            if item.has_sub_items() {
                let sub_items = filter_sub_items(&item.sub_items, &is_allowed);
                if sub_items.iter().any(|sub| !sub.is_section) {
                    Some(MenuItem {
                        sub_items,
                        ..item.clone()
                    })
                } else {
                    None
                }
            } else if is_allowed(item.path.as_deref()) {
                Some(item.clone())
            } else {
                None
            }
        })
        .collect();

    pin_to_front(&mut visible);
    visible
}

/// Keeps allowed links plus each section header that introduces at least
/// one of them.
fn filter_sub_items<F>(sub_items: &[SubItem], is_allowed: &F) -> Vec<SubItem>
where
    F: Fn(Option<&str>) -> bool,
{
    let mut kept = Vec::new();
    let mut pending_section: Option<&SubItem> = None;

    for sub in sub_items {
        if sub.is_section {
            pending_section = Some(sub);
            continue;
        }
        if is_allowed(sub.path.as_deref()) {
            if let Some(section) = pending_section.take() {
                kept.push(section.clone());
            }
            kept.push(sub.clone());
        }
    }

    kept
}

fn is_pinned(item: &MenuItem) -> bool {
    item.path.as_deref() == Some(PINNED_PATH) || item.label.trim().eq_ignore_ascii_case(PINNED_LABEL)
}

fn pin_to_front(items: &mut Vec<MenuItem>) {
    if let Some(position) = items.iter().position(is_pinned) {
        let pinned = items.remove(position);
        items.insert(0, pinned);
    }
}

/// Gives every item and sub-item without an `order` its current position,
/// then stable-sorts both levels by `order`. Idempotent.
pub fn normalize_order(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = items
        .into_iter()
        .enumerate()
        .map(|(position, mut item)| {
            item.order.get_or_insert(position as i32);
            for (sub_position, sub) in item.sub_items.iter_mut().enumerate() {
                sub.order.get_or_insert(sub_position as i32);
            }
            // Vec::sort_by_key is stable
            item.sub_items.sort_by_key(|sub| sub.order);
            item
        })
        .collect();

    items.sort_by_key(|item| item.order);
    items
}
