//! # Worklogz Core - Domain Module
//! 
//! Access entries, route rules, menu tree and icon registry.

pub mod scope;
pub mod access;
pub mod route_permission;
pub mod menu;
pub mod default_menu;
pub mod icon;

pub use scope::Scope;
pub use access::{AccessEntry, AccessPaths, UserId};
pub use route_permission::{is_authorized, RouteMethod, RoutePermissionEntry, RouteRule};
pub use menu::{validate_menu, MenuItem, SubItem};
pub use icon::{IconHandle, IconRegistry};
