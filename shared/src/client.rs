//! Client-related types shared between console and client
//!
//! Request/response DTOs for the admin API that are not employee records.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request (sent as an OAuth2 password form)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

// =============================================================================
// Mutation acknowledgement
// =============================================================================

/// Acknowledgement returned by mutation endpoints.
///
/// The backend answers `{"message": "..."}` plus endpoint specific fields,
/// which are ignored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Parse a response body leniently: non-JSON bodies become the message.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self::new(body.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_from_json_body() {
        let ack = Ack::from_body(r#"{"message":"Employee deleted successfully"}"#);
        assert_eq!(ack.message, "Employee deleted successfully");
    }

    #[test]
    fn test_ack_ignores_extra_fields() {
        let ack = Ack::from_body(
            r#"{"message":"updated","is_active":false,"expires_at":null}"#,
        );
        assert_eq!(ack.message, "updated");
    }

    #[test]
    fn test_ack_from_plain_body() {
        assert_eq!(Ack::from_body(" ok \n").message, "ok");
        assert_eq!(Ack::from_body("").message, "");
    }
}
