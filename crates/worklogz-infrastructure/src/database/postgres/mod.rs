//! PostgreSQL repository implementations

pub mod access_repo_impl;
pub mod route_permission_repo_impl;
pub mod sidebar_menu_repo_impl;

pub use access_repo_impl::PgAccessStore;
pub use route_permission_repo_impl::PgRoutePermissionStore;
pub use sidebar_menu_repo_impl::PgSidebarMenuStore;
