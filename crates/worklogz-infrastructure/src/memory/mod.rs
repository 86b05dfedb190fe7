//! In-memory stores (DashMap), used when no database is configured

pub mod access_store;
pub mod route_permission_store;
pub mod sidebar_menu_store;

pub use access_store::MemoryAccessStore;
pub use route_permission_store::MemoryRoutePermissionStore;
pub use sidebar_menu_store::MemorySidebarMenuStore;
