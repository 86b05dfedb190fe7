//! # Worklogz Core
//! 
//! Access-map domain, repository ports, and the sync facades that keep a
//! local cache aligned with the backend of record.

pub mod domain;
pub mod dto;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
