//! Turnstile Client - HTTP client for the access-control admin API
//!
//! Provides the credential accessor and the employee directory operations
//! used by the admin console.

pub mod config;
pub mod credential;
pub mod directory;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use credential::{AccessToken, Credential, CredentialSource, CredentialStorage, StaticCredential};
pub use directory::{DirectoryApi, DirectoryClient};
pub use error::{ClientError, ClientResult, Operation};
pub use http::NetworkHttpClient;

// Re-export shared types for convenience
pub use shared::{Ack, EmployeeId, EmployeeRecord, LoginResponse, StatusChange};
