use std::path::PathBuf;

use turnstile_client::{ClientConfig, CredentialStorage};

use crate::grid::DEFAULT_PAGE_SIZE;

/// Console configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TURNSTILE_API_URL | http://localhost:8000 | admin API base URL |
/// | TURNSTILE_CREDENTIAL_DIR | ./.turnstile | directory of the stored credential |
/// | TURNSTILE_CREDENTIAL_FILE | credential.json | credential file name |
/// | REQUEST_TIMEOUT_SECS | unset | HTTP timeout; unset waits indefinitely |
/// | PAGE_SIZE | 10 | rows per page |
/// | LOG_LEVEL | info | log level |
/// | LOG_DIR | unset | daily rolling log directory |
///
/// # Example
///
/// ```ignore
/// TURNSTILE_API_URL=http://gate.local:8000 PAGE_SIZE=25 cargo run -p turnstile-console
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub credential_dir: PathBuf,
    pub credential_file: String,
    pub request_timeout_secs: Option<u64>,
    pub page_size: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ConsoleConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source; unset or unparsable values
    /// fall back to their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("TURNSTILE_API_URL")
                .unwrap_or_else(|| "http://localhost:8000".into()),
            credential_dir: non_empty("TURNSTILE_CREDENTIAL_DIR")
                .unwrap_or_else(|| "./.turnstile".into())
                .into(),
            credential_file: non_empty("TURNSTILE_CREDENTIAL_FILE")
                .unwrap_or_else(|| "credential.json".into()),
            request_timeout_secs: non_empty("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
            page_size: non_empty("PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone());
        match self.request_timeout_secs {
            Some(seconds) => config.with_timeout(seconds),
            None => config,
        }
    }

    pub fn credential_storage(&self) -> CredentialStorage {
        CredentialStorage::new(self.credential_dir.clone(), &self.credential_file)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
