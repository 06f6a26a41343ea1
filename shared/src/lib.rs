//! Shared types for the Turnstile admin console
//!
//! Wire models exchanged with the access-control backend. These types are
//! shared between turnstile-client and turnstile-console.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{Ack, LoginRequest, LoginResponse};
pub use models::{EmployeeId, EmployeeRecord, StatusChange};
