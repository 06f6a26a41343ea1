//! Roster error types

use thiserror::Error;
use turnstile_client::{ClientError, Operation};

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const NO_TOKEN: &str = "No authentication token found";

/// Failures surfaced by the roster controller.
///
/// None of them is fatal: each is reported once as a notice and the
/// controller stays usable.
#[derive(Debug, Error)]
pub enum RosterError {
    /// No credential was available; no request was sent
    #[error("No authentication token found")]
    Unauthenticated,

    /// Listing failed; the previous records are kept
    #[error("Failed to fetch employees: {0}")]
    FetchFailed(#[source] ClientError),

    /// A status change or delete failed; nothing changed locally
    #[error("Failed to {operation}: {source}")]
    MutationFailed {
        operation: Operation,
        #[source]
        source: ClientError,
    },

    /// Delete confirmed without a pending request
    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,
}

impl RosterError {
    pub fn mutation(operation: Operation, source: ClientError) -> Self {
        RosterError::MutationFailed { operation, source }
    }

    /// Whether the server rejected the credential
    pub fn is_session_expired(&self) -> bool {
        match self {
            RosterError::FetchFailed(source) | RosterError::MutationFailed { source, .. } => {
                source.is_unauthorized()
            }
            _ => false,
        }
    }

    /// Short text shown to the user
    pub fn notice_text(&self) -> String {
        if self.is_session_expired() {
            return SESSION_EXPIRED.to_string();
        }
        match self {
            RosterError::Unauthenticated => NO_TOKEN.to_string(),
            RosterError::FetchFailed(_) => "Failed to fetch employees".to_string(),
            RosterError::MutationFailed { operation, .. } => format!("Failed to {operation}"),
            RosterError::NoPendingDelete => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        assert_eq!(RosterError::Unauthenticated.notice_text(), NO_TOKEN);
        assert_eq!(
            RosterError::FetchFailed(Operation::ListEmployees.failure(500, "x".into()))
                .notice_text(),
            "Failed to fetch employees"
        );
        assert_eq!(
            RosterError::mutation(
                Operation::UpdateStatus,
                Operation::UpdateStatus.failure(500, "x".into())
            )
            .notice_text(),
            "Failed to update employee status"
        );
        assert_eq!(
            RosterError::mutation(
                Operation::DeleteEmployee,
                Operation::DeleteEmployee.failure(404, "x".into())
            )
            .notice_text(),
            "Failed to delete employee"
        );
    }

    #[test]
    fn test_unauthorized_reads_as_session_expired() {
        let fetch = RosterError::FetchFailed(ClientError::Unauthorized);
        assert!(fetch.is_session_expired());
        assert_eq!(fetch.notice_text(), SESSION_EXPIRED);

        let delete = RosterError::mutation(Operation::DeleteEmployee, ClientError::Unauthorized);
        assert_eq!(delete.notice_text(), SESSION_EXPIRED);
        assert!(!RosterError::Unauthenticated.is_session_expired());
    }
}
