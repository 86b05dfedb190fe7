//! Repository traits (ports)

pub mod key_value_store;
pub mod access_store;
pub mod route_permission_store;
pub mod sidebar_menu_store;

pub use key_value_store::{KeyValueStore, MemoryKeyValueStore};
pub use access_store::AccessStore;
pub use route_permission_store::RoutePermissionStore;
pub use sidebar_menu_store::SidebarMenuStore;

#[cfg(test)]
pub use access_store::MockAccessStore;
#[cfg(test)]
pub use route_permission_store::MockRoutePermissionStore;
#[cfg(test)]
pub use sidebar_menu_store::MockSidebarMenuStore;
