//! Client configuration

use crate::{ClientResult, DirectoryClient};

/// Client configuration for connecting to the admin API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a new client configuration without a request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Create a directory client from this configuration
    pub fn build_directory_client(&self) -> ClientResult<DirectoryClient> {
        DirectoryClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
