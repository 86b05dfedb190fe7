//! # Worklogz Security
//! 
//! Caller identity for the access API: JWT issuing and validation.

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtService};
