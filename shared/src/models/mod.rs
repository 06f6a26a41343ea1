//! Data models
//!
//! Shapes returned by the `/admin` API of the access-control backend.

pub mod employee;

// Re-exports
pub use employee::*;
