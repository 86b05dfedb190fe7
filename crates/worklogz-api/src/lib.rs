//! # Worklogz API
//! 
//! Backend of record for sidebar access, route permissions and sidebar
//! menus: axum handlers, the route-permission guard and the router.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
