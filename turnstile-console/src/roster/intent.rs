// turnstile-console/src/roster/intent.rs
// Row actions and the intents they produce

use shared::EmployeeRecord;

use super::MutationTicket;

pub const DELETE_PROMPT: &str = "Are you sure to delete this employee?";

/// Action offered in a row's action cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    /// Set `is_active` to `grant`
    ToggleActive { grant: bool },
    Delete,
}

impl RowAction {
    /// Actions for a record, in display order
    pub fn for_record(record: &EmployeeRecord) -> [RowAction; 3] {
        [
            RowAction::Edit,
            RowAction::ToggleActive {
                grant: !record.is_active,
            },
            RowAction::Delete,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::ToggleActive { grant: true } => "Grant access",
            RowAction::ToggleActive { grant: false } => "Revoke access",
            RowAction::Delete => "Delete",
        }
    }
}

/// Navigation to the edit screen, carrying the whole record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub record: EmployeeRecord,
}

impl EditRequest {
    pub fn path(&self) -> String {
        format!("/edit-employee/{}", self.record.uuid)
    }
}

/// Receives edit navigation
pub trait EditNavigator: Send + Sync {
    fn navigate(&self, request: &EditRequest);
}

/// Delete waiting for an explicit yes or no
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub record: EmployeeRecord,
}

impl DeleteConfirmation {
    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }
}

/// Result of dispatching a row action
#[derive(Debug)]
pub enum Dispatched {
    Navigated(EditRequest),
    Mutation(MutationTicket),
    AwaitingConfirmation(DeleteConfirmation),
}
