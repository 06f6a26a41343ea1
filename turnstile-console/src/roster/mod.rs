//! Roster state controller
//!
//! Owns the fetched employee collection and keeps it consistent with the
//! server. Remote work is split into tickets: the controller hands out a
//! [`LoadTicket`] or [`MutationTicket`], the caller runs it wherever it
//! likes (usually a spawned task), and feeds the outcome back through
//! [`RosterController::apply_load`] or [`RosterController::settle_mutation`].
//! Only the controller ever writes to [`RosterState`].

mod controller;
mod intent;
mod state;

pub use controller::{
    LoadApplied, LoadOutcome, LoadTicket, Mutation, MutationOutcome, MutationTicket,
    RosterController,
};
pub use intent::{DeleteConfirmation, Dispatched, EditNavigator, EditRequest, RowAction};
pub use state::{RefreshToken, RosterPhase, RosterState};
