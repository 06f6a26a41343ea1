//! Client error types

use std::fmt;
use thiserror::Error;

/// Remote operation a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListEmployees,
    UpdateStatus,
    DeleteEmployee,
    Login,
}

impl Operation {
    /// Whether a failure of this operation counts as a rejected write
    pub fn is_mutation(self) -> bool {
        matches!(self, Operation::UpdateStatus | Operation::DeleteEmployee)
    }

    /// Map a non-success HTTP status to the typed failure for this operation
    pub fn failure(self, status: u16, message: String) -> ClientError {
        if self.is_mutation() {
            return ClientError::MutationFailed {
                operation: self,
                status,
                message,
            };
        }
        match self {
            Operation::ListEmployees => ClientError::FetchFailed { status, message },
            _ => ClientError::Rejected { status, message },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::ListEmployees => "fetch employees",
            Operation::UpdateStatus => "update employee status",
            Operation::DeleteEmployee => "delete employee",
            Operation::Login => "log in",
        })
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, reset, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered 401: credential missing, invalid or expired
    #[error("Authentication required")]
    Unauthorized,

    /// The employee list could not be fetched
    #[error("Failed to fetch employees (HTTP {status}): {message}")]
    FetchFailed { status: u16, message: String },

    /// A status change or delete was rejected
    #[error("Failed to {operation} (HTTP {status}): {message}")]
    MutationFailed {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// Any other non-success answer (login)
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credential file could not be read or written
    #[error("Credential storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Client could not be configured
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// HTTP status carried by the failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::FetchFailed { status, .. }
            | ClientError::MutationFailed { status, .. }
            | ClientError::Rejected { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
