// turnstile-client/src/credential.rs
// Credential accessor - bearer token lookup and JSON file storage

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use shared::LoginResponse;

/// Bearer token presented to the admin API
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Supplies the current bearer token, if any.
///
/// `None` is an expected outcome (nobody logged in), not a failure.
/// Implementations must not have side effects.
pub trait CredentialSource: Send + Sync {
    fn get(&self) -> Option<AccessToken>;
}

/// Fixed credential, injected by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<AccessToken>);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(AccessToken::new(token)))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn get(&self) -> Option<AccessToken> {
        self.0.clone()
    }
}

/// Stored credential
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
    /// Unix seconds after which the token is considered gone
    #[serde(default)]
    pub expires_at: Option<u64>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, expires_at: Option<u64>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
            expires_at,
        }
    }

    pub fn token(&self) -> AccessToken {
        AccessToken::new(self.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            return now > expires_at;
        }
        false
    }
}

impl From<LoginResponse> for Credential {
    fn from(login: LoginResponse) -> Self {
        Self {
            access_token: login.access_token,
            token_type: login.token_type,
            expires_at: None,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Credential storage backed by a JSON file
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, credential: &Credential) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)
    }

    /// Load the stored credential; unreadable files count as absent
    pub fn load(&self) -> Option<Credential> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!("Ignoring unreadable credential at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSource for CredentialStorage {
    fn get(&self) -> Option<AccessToken> {
        self.load()
            .filter(|credential| !credential.is_expired())
            .map(|credential| credential.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let token = AccessToken::new("abc");
        assert_eq!(token.bearer(), "Bearer abc");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
    }

    #[test]
    fn test_static_credential() {
        assert_eq!(StaticCredential::new("t").get(), Some(AccessToken::new("t")));
        assert!(StaticCredential::absent().get().is_none());
    }

    #[test]
    fn test_credential_debug_hides_token() {
        let credential = Credential::new("secret-token", None);
        assert!(!format!("{:?}", credential).contains("secret-token"));
    }

    #[test]
    fn test_credential_from_login() {
        let credential = Credential::from(LoginResponse {
            access_token: "jwt".into(),
            token_type: "bearer".into(),
        });
        assert_eq!(credential.token().as_str(), "jwt");
        assert!(!credential.is_expired());
    }
}
