// turnstile-console/src/roster/state.rs
// Roster state - fetched records, loading flag, refresh token

use std::fmt;

use shared::{EmployeeId, EmployeeRecord};

/// Generation counter of the roster.
///
/// Starts at 0 and advances once per invalidation. A load result is only
/// accepted while its token is still the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    /// Last load settled, successfully or not
    Loaded,
    /// No usable credential; shown instead of the table
    Unauthorized,
}

#[derive(Debug, Clone, Default)]
pub struct RosterState {
    records: Vec<EmployeeRecord>,
    loading: bool,
    refresh_token: RefreshToken,
    phase: RosterPhase,
    last_error: Option<String>,
}

impl RosterState {
    /// Records in server order
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn refresh_token(&self) -> RefreshToken {
        self.refresh_token
    }

    pub fn phase(&self) -> RosterPhase {
        self.phase
    }

    /// Notice text of the last failed load, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&EmployeeRecord> {
        self.records.iter().find(|record| &record.uuid == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn start_loading(&mut self) {
        self.loading = true;
        self.phase = RosterPhase::Loading;
    }

    pub(crate) fn advance_token(&mut self) -> RefreshToken {
        self.refresh_token = self.refresh_token.next();
        self.refresh_token
    }

    pub(crate) fn replace(&mut self, records: Vec<EmployeeRecord>) {
        self.records = records;
        self.loading = false;
        self.phase = RosterPhase::Loaded;
        self.last_error = None;
    }

    /// Settle a failed load; records are kept
    pub(crate) fn fail(&mut self, phase: RosterPhase, message: String) {
        self.loading = false;
        self.phase = phase;
        self.last_error = Some(message);
    }
}
