//! # Worklogz Infrastructure
//! 
//! Adapters for the core ports: the HTTP backend client, the file-backed
//! key-value store, and the in-memory and PostgreSQL stores behind the
//! backend API.

pub mod database;
pub mod http;
pub mod kv;
pub mod memory;

pub use database::{create_pool, ensure_schema, PgAccessStore, PgRoutePermissionStore, PgSidebarMenuStore};
pub use http::BackendClient;
pub use kv::FileKeyValueStore;
pub use memory::{MemoryAccessStore, MemoryRoutePermissionStore, MemorySidebarMenuStore};
