// turnstile-console/src/filter/state.rs
// Per-column candidate and active filters, plus the last confirmed search

use std::collections::BTreeMap;

use shared::EmployeeRecord;

use super::highlight::{Segment, highlight};
use super::{ColumnKey, ColumnPredicate, FilterError, FilterKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ColumnFilter {
    /// Typed or selected but not yet confirmed
    candidate: String,
    /// Confirmed value; its predicate applies to rows
    active: Option<String>,
}

/// The last confirmed (column, text) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchedColumn {
    pub column: ColumnKey,
    pub text: String,
}

/// Filter state of the employee table.
///
/// Every operation touches exactly one column; the only cross-column state
/// is [`last_searched`](Self::last_searched), which decides where matches
/// are highlighted.
#[derive(Debug, Clone, Default)]
pub struct ColumnFilterState {
    columns: BTreeMap<ColumnKey, ColumnFilter>,
    last_searched: Option<SearchedColumn>,
}

impl ColumnFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the pending input of a column without applying it
    pub fn set_candidate(&mut self, column: ColumnKey, value: impl Into<String>) {
        self.columns.entry(column).or_default().candidate = value.into();
    }

    pub fn candidate(&self, column: ColumnKey) -> &str {
        self.columns
            .get(&column)
            .map(|filter| filter.candidate.as_str())
            .unwrap_or("")
    }

    /// Apply `value` as the column's filter and record it as the last search.
    ///
    /// An empty value is the same as [`clear`](Self::clear). Values an
    /// enumerated column does not list are rejected and change nothing.
    pub fn confirm(&mut self, column: ColumnKey, value: &str) -> Result<(), FilterError> {
        if column.definition().predicate(value)?.is_none() {
            self.clear(column);
            return Ok(());
        }

        let filter = self.columns.entry(column).or_default();
        filter.candidate = value.to_string();
        filter.active = Some(value.to_string());
        self.last_searched = Some(SearchedColumn {
            column,
            text: value.to_string(),
        });
        tracing::debug!(%column, "filter confirmed");
        Ok(())
    }

    /// Confirm whatever is pending for the column
    pub fn confirm_candidate(&mut self, column: ColumnKey) -> Result<(), FilterError> {
        let candidate = self.candidate(column).to_string();
        self.confirm(column, &candidate)
    }

    /// Remove the column's filter and pending input; other columns keep theirs
    pub fn clear(&mut self, column: ColumnKey) {
        self.columns.remove(&column);
        if self
            .last_searched
            .as_ref()
            .is_some_and(|searched| searched.column == column)
        {
            self.last_searched = None;
        }
    }

    pub fn clear_all(&mut self) {
        self.columns.clear();
        self.last_searched = None;
    }

    pub fn active(&self, column: ColumnKey) -> Option<&str> {
        self.columns
            .get(&column)
            .and_then(|filter| filter.active.as_deref())
    }

    pub fn is_filtered(&self) -> bool {
        self.columns.values().any(|filter| filter.active.is_some())
    }

    pub fn predicate(&self, column: ColumnKey) -> Option<ColumnPredicate> {
        let value = self.active(column)?;
        column.definition().predicate(value).ok().flatten()
    }

    /// Whether the record passes every active filter
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        ColumnKey::ALL.into_iter().all(|column| match self.predicate(column) {
            Some(predicate) => predicate.matches(column.field_value(record).as_deref()),
            None => true,
        })
    }

    pub fn last_searched(&self) -> Option<&SearchedColumn> {
        self.last_searched.as_ref()
    }

    /// Cell segments for a column, highlighted only when it is the last
    /// searched column.
    ///
    /// Text columns highlight every matching substring; enumerated columns
    /// highlight the whole cell when its value equals the search.
    pub fn highlight(&self, column: ColumnKey, record: &EmployeeRecord) -> Vec<Segment> {
        let text = column.display(record);
        let Some(searched) = self.last_searched.as_ref().filter(|s| s.column == column) else {
            return vec![Segment::plain(text)];
        };

        match column.definition().filter {
            FilterKind::Text => highlight(&text, &searched.text),
            FilterKind::Enumerated(_) => {
                let matched = column.field_value(record).as_deref() == Some(searched.text.as_str());
                vec![Segment { text, matched }]
            }
            FilterKind::None => vec![Segment::plain(text)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::employee::timestamp;

    fn john() -> EmployeeRecord {
        EmployeeRecord::new("1", "John Doe", "john@example.com", true)
    }

    fn jane() -> EmployeeRecord {
        EmployeeRecord::new("2", "Jane Roe", "jane@example.com", false)
    }

    #[test]
    fn test_empty_state_matches_everything() {
        let state = ColumnFilterState::new();
        assert!(!state.is_filtered());
        assert!(state.matches(&john()));
        assert!(state.matches(&jane()));
        assert!(state.last_searched().is_none());
    }

    #[test]
    fn test_candidate_does_not_filter_until_confirmed() {
        let mut state = ColumnFilterState::new();
        state.set_candidate(ColumnKey::Name, "doe");

        assert_eq!(state.candidate(ColumnKey::Name), "doe");
        assert!(state.active(ColumnKey::Name).is_none());
        assert!(state.matches(&jane()));

        state.confirm_candidate(ColumnKey::Name).unwrap();
        assert_eq!(state.active(ColumnKey::Name), Some("doe"));
        assert!(state.matches(&john()));
        assert!(!state.matches(&jane()));
    }

    #[test]
    fn test_filters_are_a_conjunction() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::Email, "example.com").unwrap();
        state.confirm(ColumnKey::IsActive, "false").unwrap();

        assert!(!state.matches(&john()));
        assert!(state.matches(&jane()));
    }

    #[test]
    fn test_clear_leaves_other_columns_alone() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::Name, "doe").unwrap();
        state.set_candidate(ColumnKey::Email, "jane");
        state.confirm(ColumnKey::IsActive, "true").unwrap();

        state.clear(ColumnKey::Name);

        assert!(state.active(ColumnKey::Name).is_none());
        assert_eq!(state.candidate(ColumnKey::Name), "");
        assert_eq!(state.candidate(ColumnKey::Email), "jane");
        assert_eq!(state.active(ColumnKey::IsActive), Some("true"));
        assert_eq!(
            state.last_searched().map(|s| s.column),
            Some(ColumnKey::IsActive)
        );
    }

    #[test]
    fn test_confirm_leaves_other_candidates_alone() {
        let mut state = ColumnFilterState::new();
        state.set_candidate(ColumnKey::Email, "jane");
        state.confirm(ColumnKey::Name, "doe").unwrap();
        assert_eq!(state.candidate(ColumnKey::Email), "jane");
        assert!(state.active(ColumnKey::Email).is_none());
    }

    #[test]
    fn test_confirm_empty_equals_clear() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::Name, "doe").unwrap();
        state.confirm(ColumnKey::Name, "").unwrap();

        assert!(!state.is_filtered());
        assert!(state.last_searched().is_none());
    }

    #[test]
    fn test_clearing_another_column_keeps_last_searched() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::Email, "example").unwrap();
        state.confirm(ColumnKey::Name, "doe").unwrap();
        state.clear(ColumnKey::Email);

        assert_eq!(
            state.last_searched(),
            Some(&SearchedColumn {
                column: ColumnKey::Name,
                text: "doe".into()
            })
        );
    }

    #[test]
    fn test_invalid_enumerated_value_changes_nothing() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::Name, "doe").unwrap();

        let err = state.confirm(ColumnKey::IsActive, "maybe").unwrap_err();
        assert!(matches!(err, FilterError::UnknownOption { .. }));
        assert!(state.active(ColumnKey::IsActive).is_none());
        assert_eq!(
            state.last_searched().map(|s| s.column),
            Some(ColumnKey::Name)
        );
    }

    fn expiring(raw: &str) -> EmployeeRecord {
        jane().with_expires_at(timestamp::parse(raw).unwrap())
    }

    #[test]
    fn test_missing_expiry_never_matches_text_filter() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::ExpiresAt, "N/A").unwrap();
        assert!(!state.matches(&john()));

        state.confirm(ColumnKey::ExpiresAt, "2025").unwrap();
        assert!(!state.matches(&john()));
        assert!(state.matches(&expiring("2025-12-01T08:00:00")));
    }

    #[test]
    fn test_expiry_filter_matches_wire_form() {
        let record = expiring("2025-12-01T08:00:00");
        let mut state = ColumnFilterState::new();

        state.confirm(ColumnKey::ExpiresAt, "2025-12-01T08").unwrap();
        assert!(state.matches(&record));

        state.confirm(ColumnKey::ExpiresAt, "08:00:00").unwrap();
        assert!(state.matches(&record));

        state.confirm(ColumnKey::ExpiresAt, "2025-12-01 08:00").unwrap();
        assert!(!state.matches(&record));
    }

    #[test]
    fn test_highlight_follows_last_confirmed_column() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::Name, "doe").unwrap();
        assert_eq!(
            state.highlight(ColumnKey::Name, &john()),
            vec![Segment::plain("John "), Segment::matched("Doe")]
        );

        state.confirm(ColumnKey::IsActive, "true").unwrap();
        assert_eq!(
            state.highlight(ColumnKey::Name, &john()),
            vec![Segment::plain("John Doe")]
        );
        assert_eq!(
            state.highlight(ColumnKey::IsActive, &john()),
            vec![Segment::matched("Yes")]
        );
        assert_eq!(
            state.highlight(ColumnKey::IsActive, &jane()),
            vec![Segment::plain("No")]
        );
    }

    #[test]
    fn test_clear_all() {
        let mut state = ColumnFilterState::new();
        state.confirm(ColumnKey::Name, "doe").unwrap();
        state.set_candidate(ColumnKey::Email, "x");
        state.clear_all();
        assert!(!state.is_filtered());
        assert_eq!(state.candidate(ColumnKey::Email), "");
        assert!(state.last_searched().is_none());
    }

    mod properties {
        use super::*;
        use crate::grid::visible_records;
        use chrono::DateTime;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Candidate(ColumnKey, String),
            Confirm(ColumnKey, String),
            Clear(ColumnKey),
        }

        /// What the filter state should hold after a sequence of operations
        #[derive(Debug, Default)]
        struct Expected {
            active: BTreeMap<ColumnKey, String>,
            candidates: BTreeMap<ColumnKey, String>,
            last_searched: Option<SearchedColumn>,
        }

        impl Expected {
            fn forget(&mut self, column: ColumnKey) {
                self.active.remove(&column);
                self.candidates.remove(&column);
                if self.last_searched.as_ref().is_some_and(|s| s.column == column) {
                    self.last_searched = None;
                }
            }
        }

        fn column() -> impl Strategy<Value = ColumnKey> {
            prop::sample::select(ColumnKey::ALL.to_vec())
        }

        fn value() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(String::new()),
                Just("true".to_string()),
                Just("false".to_string()),
                "[a-dA-D0-9 :T-]{1,3}",
            ]
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (column(), value()).prop_map(|(c, v)| Op::Candidate(c, v)),
                (column(), value()).prop_map(|(c, v)| Op::Confirm(c, v)),
                column().prop_map(Op::Clear),
            ]
        }

        fn records() -> impl Strategy<Value = Vec<EmployeeRecord>> {
            prop::collection::vec(
                (
                    "[a-dA-D ]{0,6}",
                    "[a-d]{0,4}@x",
                    any::<bool>(),
                    prop::option::of(1_700_000_000i64..1_800_000_000i64),
                ),
                0..12,
            )
            .prop_map(|parts| {
                parts
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, email, active, expiry))| {
                        let record = EmployeeRecord::new(i.to_string(), name, email, active);
                        match expiry.and_then(|secs| DateTime::from_timestamp(secs, 0)) {
                            Some(ts) => record.with_expires_at(ts.naive_utc()),
                            None => record,
                        }
                    })
                    .collect()
            })
        }

        fn apply(state: &mut ColumnFilterState, expected: &mut Expected, op: &Op) {
            match op {
                Op::Candidate(column, v) => {
                    state.set_candidate(*column, v.clone());
                    expected.candidates.insert(*column, v.clone());
                }
                Op::Confirm(column, v) => match state.confirm(*column, v) {
                    Ok(()) if v.is_empty() => expected.forget(*column),
                    Ok(()) => {
                        expected.active.insert(*column, v.clone());
                        expected.candidates.insert(*column, v.clone());
                        expected.last_searched = Some(SearchedColumn {
                            column: *column,
                            text: v.clone(),
                        });
                    }
                    Err(_) => {}
                },
                Op::Clear(column) => {
                    state.clear(*column);
                    expected.forget(*column);
                }
            }
        }

        fn passes(expected: &Expected, record: &EmployeeRecord) -> bool {
            expected.active.iter().all(|(column, v)| {
                match column.definition().predicate(v) {
                    Ok(Some(predicate)) => predicate.matches(column.field_value(record).as_deref()),
                    _ => false,
                }
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Visible rows are exactly the records passing every confirmed filter
            #[test]
            fn visible_rows_are_the_conjunction_of_active_filters(
                all in records(),
                ops in prop::collection::vec(op(), 0..16),
            ) {
                let mut state = ColumnFilterState::new();
                let mut expected = Expected::default();

                for op in &ops {
                    apply(&mut state, &mut expected, op);

                    prop_assert_eq!(state.last_searched(), expected.last_searched.as_ref());
                    for column in ColumnKey::ALL {
                        prop_assert_eq!(
                            state.active(column),
                            expected.active.get(&column).map(String::as_str)
                        );
                        prop_assert_eq!(
                            state.candidate(column),
                            expected.candidates.get(&column).map(String::as_str).unwrap_or("")
                        );
                    }

                    let visible: Vec<&str> = visible_records(&all, &state, None)
                        .iter()
                        .map(|r| r.uuid.as_str())
                        .collect();
                    let direct: Vec<&str> = all
                        .iter()
                        .filter(|r| passes(&expected, r))
                        .map(|r| r.uuid.as_str())
                        .collect();
                    prop_assert_eq!(visible, direct);
                }
            }

            /// Clearing one column leaves every other column's filter and input alone
            #[test]
            fn clearing_a_column_leaves_the_others(
                ops in prop::collection::vec(op(), 0..16),
                cleared in column(),
            ) {
                let mut state = ColumnFilterState::new();
                let mut expected = Expected::default();
                for op in &ops {
                    apply(&mut state, &mut expected, op);
                }

                let before: Vec<_> = ColumnKey::ALL
                    .into_iter()
                    .filter(|c| *c != cleared)
                    .map(|c| {
                        (
                            c,
                            state.active(c).map(str::to_string),
                            state.candidate(c).to_string(),
                            state.predicate(c),
                        )
                    })
                    .collect();

                state.clear(cleared);

                prop_assert!(state.active(cleared).is_none());
                prop_assert_eq!(state.candidate(cleared), "");
                for (c, active, candidate, predicate) in before {
                    prop_assert_eq!(state.active(c).map(str::to_string), active);
                    prop_assert_eq!(state.candidate(c), candidate.as_str());
                    prop_assert_eq!(state.predicate(c), predicate);
                }
            }
        }
    }
}
