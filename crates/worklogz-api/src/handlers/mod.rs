//! HTTP handlers

pub mod health;
pub mod route_permissions;
pub mod sidebar_access;
pub mod sidebar_menu;
