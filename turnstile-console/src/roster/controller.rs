// turnstile-console/src/roster/controller.rs
// Roster controller - load lifecycle, mutation intents, reconciliation

use std::fmt;
use std::sync::Arc;

use shared::{Ack, EmployeeId, EmployeeRecord};
use turnstile_client::{AccessToken, ClientResult, CredentialSource, DirectoryApi, Operation};

use super::intent::{DeleteConfirmation, Dispatched, EditNavigator, EditRequest, RowAction};
use super::state::{RefreshToken, RosterPhase, RosterState};
use crate::error::RosterError;
use crate::notice::Notifier;

/// A list request bound to the refresh token it was issued under
pub struct LoadTicket {
    token: RefreshToken,
    credential: AccessToken,
    api: Arc<dyn DirectoryApi>,
}

impl LoadTicket {
    pub fn token(&self) -> RefreshToken {
        self.token
    }

    pub async fn run(self) -> LoadOutcome {
        let result = self.api.list(&self.credential).await;
        LoadOutcome {
            token: self.token,
            result,
        }
    }
}

impl fmt::Debug for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTicket")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub token: RefreshToken,
    pub result: ClientResult<Vec<EmployeeRecord>>,
}

/// What [`RosterController::apply_load`] did with an outcome
#[derive(Debug)]
pub enum LoadApplied {
    Loaded { count: usize },
    /// Previous records kept
    Failed(RosterError),
    /// Superseded by a newer token; ignored
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetActive { id: EmployeeId, active: bool },
    Remove { id: EmployeeId },
}

impl Mutation {
    pub fn id(&self) -> &EmployeeId {
        match self {
            Mutation::SetActive { id, .. } | Mutation::Remove { id } => id,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Mutation::SetActive { .. } => Operation::UpdateStatus,
            Mutation::Remove { .. } => Operation::DeleteEmployee,
        }
    }

    fn success_text(&self) -> &'static str {
        match self {
            Mutation::SetActive { active: true, .. } => "Employee access granted",
            Mutation::SetActive { active: false, .. } => "Employee access revoked",
            Mutation::Remove { .. } => "Employee deleted",
        }
    }
}

/// A status change or delete ready to be sent
pub struct MutationTicket {
    mutation: Mutation,
    credential: AccessToken,
    api: Arc<dyn DirectoryApi>,
}

impl MutationTicket {
    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    pub async fn run(self) -> MutationOutcome {
        let result = match &self.mutation {
            Mutation::SetActive { id, active } => {
                self.api.set_active(id, *active, &self.credential).await
            }
            Mutation::Remove { id } => self.api.remove(id, &self.credential).await,
        };
        MutationOutcome {
            mutation: self.mutation,
            result,
        }
    }
}

impl fmt::Debug for MutationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationTicket")
            .field("mutation", &self.mutation)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct MutationOutcome {
    pub mutation: Mutation,
    pub result: ClientResult<Ack>,
}

/// Sole writer of the roster.
///
/// Every successful mutation advances the refresh token exactly once and
/// issues a new load; a load outcome is accepted only while its token is
/// current, so results land in token order whatever order they arrive in.
pub struct RosterController {
    api: Arc<dyn DirectoryApi>,
    credentials: Arc<dyn CredentialSource>,
    notifier: Arc<dyn Notifier>,
    navigator: Option<Arc<dyn EditNavigator>>,
    state: RosterState,
    pending_delete: Option<DeleteConfirmation>,
}

impl RosterController {
    pub fn new(
        api: Arc<dyn DirectoryApi>,
        credentials: Arc<dyn CredentialSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            credentials,
            notifier,
            navigator: None,
            state: RosterState::default(),
            pending_delete: None,
        }
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn EditNavigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn pending_delete(&self) -> Option<&DeleteConfirmation> {
        self.pending_delete.as_ref()
    }

    // ========== Loading ==========

    /// Initial load
    pub fn mount(&mut self) -> Option<LoadTicket> {
        tracing::debug!("mounting roster");
        self.refresh()
    }

    /// User-triggered reload; ignored while a load is pending
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        if self.state.is_loading() {
            tracing::debug!(token = %self.state.refresh_token(), "load already pending");
            return None;
        }
        self.begin_load()
    }

    /// Advance the refresh token and issue a load that supersedes any
    /// pending one
    pub fn invalidate(&mut self) -> Option<LoadTicket> {
        let token = self.state.advance_token();
        tracing::info!(%token, "roster invalidated");
        self.begin_load()
    }

    /// The edit screen saved a record
    pub fn on_edit_saved(&mut self) -> Option<LoadTicket> {
        self.invalidate()
    }

    fn begin_load(&mut self) -> Option<LoadTicket> {
        let Some(credential) = self.credentials.get() else {
            let err = RosterError::Unauthenticated;
            tracing::warn!("no credential, roster not loaded");
            self.state.fail(RosterPhase::Unauthorized, err.notice_text());
            self.notifier.error(&err.notice_text());
            return None;
        };

        self.state.start_loading();
        Some(LoadTicket {
            token: self.state.refresh_token(),
            credential,
            api: self.api.clone(),
        })
    }

    pub fn apply_load(&mut self, outcome: LoadOutcome) -> LoadApplied {
        let current = self.state.refresh_token();
        if outcome.token != current || !self.state.is_loading() {
            tracing::debug!(token = %outcome.token, %current, "discarding stale load");
            return LoadApplied::Stale;
        }

        match outcome.result {
            Ok(records) => {
                let count = records.len();
                self.state.replace(records);
                tracing::info!(count, token = %current, "roster loaded");
                LoadApplied::Loaded { count }
            }
            Err(source) => {
                let err = RosterError::FetchFailed(source);
                let phase = if err.is_session_expired() {
                    RosterPhase::Unauthorized
                } else {
                    RosterPhase::Loaded
                };
                tracing::error!(error = %err, "roster load failed");
                self.state.fail(phase, err.notice_text());
                self.notifier.error(&err.notice_text());
                LoadApplied::Failed(err)
            }
        }
    }

    // ========== Intents ==========

    /// Navigate to the edit screen; no network call
    pub fn request_edit(&self, record: &EmployeeRecord) -> EditRequest {
        let request = EditRequest {
            record: record.clone(),
        };
        tracing::debug!(path = %request.path(), "edit requested");
        if let Some(navigator) = &self.navigator {
            navigator.navigate(&request);
        }
        request
    }

    /// Flip the record's access status
    pub fn request_toggle_active(
        &self,
        record: &EmployeeRecord,
    ) -> Result<MutationTicket, RosterError> {
        self.mutation_ticket(Mutation::SetActive {
            id: record.uuid.clone(),
            active: !record.is_active,
        })
    }

    /// Ask for confirmation before deleting; replaces any earlier request
    pub fn request_delete(&mut self, record: &EmployeeRecord) -> &DeleteConfirmation {
        self.pending_delete.insert(DeleteConfirmation {
            record: record.clone(),
        })
    }

    pub fn cancel_delete(&mut self) -> Option<DeleteConfirmation> {
        self.pending_delete.take()
    }

    pub fn confirm_delete(&mut self) -> Result<MutationTicket, RosterError> {
        let confirmation = self
            .pending_delete
            .take()
            .ok_or(RosterError::NoPendingDelete)?;
        self.mutation_ticket(Mutation::Remove {
            id: confirmation.record.uuid,
        })
    }

    pub fn dispatch(
        &mut self,
        action: RowAction,
        record: &EmployeeRecord,
    ) -> Result<Dispatched, RosterError> {
        match action {
            RowAction::Edit => Ok(Dispatched::Navigated(self.request_edit(record))),
            RowAction::ToggleActive { .. } => {
                Ok(Dispatched::Mutation(self.request_toggle_active(record)?))
            }
            RowAction::Delete => Ok(Dispatched::AwaitingConfirmation(
                self.request_delete(record).clone(),
            )),
        }
    }

    fn mutation_ticket(&self, mutation: Mutation) -> Result<MutationTicket, RosterError> {
        let Some(credential) = self.credentials.get() else {
            let err = RosterError::Unauthenticated;
            tracing::warn!(employee = %mutation.id(), "no credential, mutation not sent");
            self.notifier.error(&err.notice_text());
            return Err(err);
        };
        tracing::debug!(?mutation, "mutation issued");
        Ok(MutationTicket {
            mutation,
            credential,
            api: self.api.clone(),
        })
    }

    /// Reconcile after a mutation settles.
    ///
    /// Success invalidates the roster and returns the follow-up load.
    /// Failure leaves records and token untouched.
    pub fn settle_mutation(
        &mut self,
        outcome: MutationOutcome,
    ) -> Result<Option<LoadTicket>, RosterError> {
        let mutation = outcome.mutation;
        match outcome.result {
            Ok(ack) => {
                tracing::info!(employee = %mutation.id(), message = %ack.message, "mutation applied");
                self.notifier.success(mutation.success_text());
                Ok(self.invalidate())
            }
            Err(source) => {
                let err = RosterError::mutation(mutation.operation(), source);
                tracing::error!(employee = %mutation.id(), error = %err, "mutation failed");
                self.notifier.error(&err.notice_text());
                Err(err)
            }
        }
    }

    // ========== Inline drivers ==========

    /// Run a load to completion on the current task
    pub async fn run_load(&mut self, ticket: LoadTicket) -> LoadApplied {
        let outcome = ticket.run().await;
        self.apply_load(outcome)
    }

    /// Refresh and wait for the result; `None` when nothing was issued
    pub async fn load(&mut self) -> Option<LoadApplied> {
        let ticket = self.refresh()?;
        Some(self.run_load(ticket).await)
    }

    /// Toggle, then wait for the reload
    pub async fn toggle_active(
        &mut self,
        record: &EmployeeRecord,
    ) -> Result<Option<LoadApplied>, RosterError> {
        let ticket = self.request_toggle_active(record)?;
        self.finish_mutation(ticket).await
    }

    /// Send the pending delete, then wait for the reload
    pub async fn delete_confirmed(&mut self) -> Result<Option<LoadApplied>, RosterError> {
        let ticket = self.confirm_delete()?;
        self.finish_mutation(ticket).await
    }

    async fn finish_mutation(
        &mut self,
        ticket: MutationTicket,
    ) -> Result<Option<LoadApplied>, RosterError> {
        let outcome = ticket.run().await;
        match self.settle_mutation(outcome)? {
            Some(load) => Ok(Some(self.run_load(load).await)),
            None => Ok(None),
        }
    }
}
