use std::sync::Arc;

use worklogz_core::repositories::{AccessStore, RoutePermissionStore, SidebarMenuStore};
use worklogz_security::JwtService;
use worklogz_shared::config::AccessSettings;

#[derive(Clone)]
pub struct AppState {
    pub access_store: Arc<dyn AccessStore>,
    pub route_store: Arc<dyn RoutePermissionStore>,
    pub menu_store: Arc<dyn SidebarMenuStore>,
    pub jwt: JwtService,
    pub access: AccessSettings,
}
