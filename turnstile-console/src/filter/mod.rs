//! Column filter engine
//!
//! The employee table is described by a declarative column table
//! ([`EMPLOYEE_COLUMNS`]): each column names how its cells are displayed and
//! which predicate its filter builds. [`ColumnFilterState`] holds the
//! per-column candidate and active filter values plus the last confirmed
//! search, which alone drives highlighting.

pub mod highlight;
pub mod state;

use std::fmt;
use std::str::FromStr;

use shared::EmployeeRecord;
use shared::models::employee::timestamp::WIRE_FORMAT;
use thiserror::Error;

pub use highlight::{Segment, contains_ignore_case, find_ignore_case, highlight};
pub use state::{ColumnFilterState, SearchedColumn};

/// Display format for expiration timestamps
pub const EXPIRES_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Logical column of the employee table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    Name,
    Email,
    IsActive,
    ExpiresAt,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 4] = [
        ColumnKey::Name,
        ColumnKey::Email,
        ColumnKey::IsActive,
        ColumnKey::ExpiresAt,
    ];

    /// Field name as sent by the server
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Name => "name",
            ColumnKey::Email => "email",
            ColumnKey::IsActive => "is_active",
            ColumnKey::ExpiresAt => "expires_at",
        }
    }

    pub fn definition(self) -> &'static ColumnDef {
        match self {
            ColumnKey::Name => &EMPLOYEE_COLUMNS[0],
            ColumnKey::Email => &EMPLOYEE_COLUMNS[1],
            ColumnKey::IsActive => &EMPLOYEE_COLUMNS[2],
            ColumnKey::ExpiresAt => &EMPLOYEE_COLUMNS[3],
        }
    }

    /// Column to the right, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Column to the left, wrapping around
    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Stringified field value that filters test against.
    ///
    /// Expiration uses the wire form (`2025-12-01T08:00:00`), not the cell
    /// text. A missing expiration has no value, so no text filter matches it.
    pub fn field_value(self, record: &EmployeeRecord) -> Option<String> {
        match self {
            ColumnKey::Name => Some(record.name.clone()),
            ColumnKey::Email => Some(record.email.clone()),
            ColumnKey::IsActive => Some(record.is_active.to_string()),
            ColumnKey::ExpiresAt => record
                .expires_at
                .map(|ts| ts.format(WIRE_FORMAT).to_string()),
        }
    }

    /// Text rendered in the cell
    pub fn display(self, record: &EmployeeRecord) -> String {
        match self {
            ColumnKey::IsActive => if record.is_active { "Yes" } else { "No" }.to_string(),
            ColumnKey::ExpiresAt => record
                .expires_at
                .map(|ts| ts.format(EXPIRES_AT_FORMAT).to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            _ => self.field_value(record).unwrap_or_default(),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FilterError::UnknownColumn(s.to_string()))
    }
}

/// One allowed value of an enumerated column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// How a column filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    None,
    /// Case-insensitive substring on the field value
    Text,
    /// Exact match against one of the listed values
    Enumerated(&'static [EnumOption]),
}

/// Declarative column description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: ColumnKey,
    pub title: &'static str,
    /// Share of the table width, in percent
    pub width: u16,
    pub filter: FilterKind,
    pub sortable: bool,
}

pub const ACTIVE_OPTIONS: &[EnumOption] = &[
    EnumOption {
        value: "true",
        label: "Yes",
    },
    EnumOption {
        value: "false",
        label: "No",
    },
];

pub static EMPLOYEE_COLUMNS: [ColumnDef; 4] = [
    ColumnDef {
        key: ColumnKey::Name,
        title: "Name",
        width: 25,
        filter: FilterKind::Text,
        sortable: true,
    },
    ColumnDef {
        key: ColumnKey::Email,
        title: "Email",
        width: 25,
        filter: FilterKind::Text,
        sortable: true,
    },
    ColumnDef {
        key: ColumnKey::IsActive,
        title: "Active",
        width: 8,
        filter: FilterKind::Enumerated(ACTIVE_OPTIONS),
        sortable: false,
    },
    ColumnDef {
        key: ColumnKey::ExpiresAt,
        title: "Expiration Date",
        width: 17,
        filter: FilterKind::Text,
        sortable: true,
    },
];

/// Row predicate built from a column's active filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPredicate {
    Contains(String),
    Equals(String),
}

impl ColumnPredicate {
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            ColumnPredicate::Contains(needle) => contains_ignore_case(value, needle),
            ColumnPredicate::Equals(expected) => value == expected,
        }
    }
}

impl ColumnDef {
    pub fn is_filterable(&self) -> bool {
        self.filter != FilterKind::None
    }

    /// Enumerated values, empty for other kinds
    pub fn options(&self) -> &'static [EnumOption] {
        match self.filter {
            FilterKind::Enumerated(options) => options,
            _ => &[],
        }
    }

    /// Build the predicate for `value`; an empty value means no predicate
    pub fn predicate(&self, value: &str) -> Result<Option<ColumnPredicate>, FilterError> {
        match self.filter {
            FilterKind::None => Err(FilterError::NotFilterable(self.key)),
            _ if value.is_empty() => Ok(None),
            FilterKind::Text => Ok(Some(ColumnPredicate::Contains(value.to_string()))),
            FilterKind::Enumerated(options) => {
                if options.iter().any(|option| option.value == value) {
                    Ok(Some(ColumnPredicate::Equals(value.to_string())))
                } else {
                    Err(FilterError::UnknownOption {
                        column: self.key,
                        value: value.to_string(),
                    })
                }
            }
        }
    }

    /// Next enumerated value after `current`; `None` past the last one
    pub fn next_option(&self, current: Option<&str>) -> Option<&'static str> {
        let options = self.options();
        match current {
            None => options.first().map(|option| option.value),
            Some(current) => options
                .iter()
                .position(|option| option.value == current)
                .and_then(|index| options.get(index + 1))
                .map(|option| option.value),
        }
    }
}

/// Filter errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("column '{0}' cannot be filtered")]
    NotFilterable(ColumnKey),

    #[error("'{value}' is not a valid filter for column '{column}'")]
    UnknownOption { column: ColumnKey, value: String },

    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> EmployeeRecord {
        EmployeeRecord::new("1", "John Doe", "john@example.com", true)
    }

    #[test]
    fn test_column_table_is_indexed_by_key() {
        for key in ColumnKey::ALL {
            assert_eq!(key.definition().key, key);
        }
        let total: u16 = EMPLOYEE_COLUMNS.iter().map(|c| c.width).sum();
        assert!(total <= 100);
    }

    #[test]
    fn test_column_key_parse() {
        assert_eq!("is_active".parse::<ColumnKey>().unwrap(), ColumnKey::IsActive);
        assert_eq!(
            "salary".parse::<ColumnKey>().unwrap_err(),
            FilterError::UnknownColumn("salary".into())
        );
    }

    #[test]
    fn test_column_navigation_wraps() {
        assert_eq!(ColumnKey::ExpiresAt.next(), ColumnKey::Name);
        assert_eq!(ColumnKey::Name.prev(), ColumnKey::ExpiresAt);
        assert_eq!(ColumnKey::Email.next(), ColumnKey::IsActive);
    }

    #[test]
    fn test_display_values() {
        let expires = NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(8, 5, 59)
            .unwrap();
        let with_expiry = record().with_expires_at(expires);

        assert_eq!(ColumnKey::IsActive.display(&with_expiry), "Yes");
        assert_eq!(ColumnKey::IsActive.field_value(&with_expiry).unwrap(), "true");
        assert_eq!(ColumnKey::ExpiresAt.display(&with_expiry), "2025-12-01 08:05");
        assert_eq!(
            ColumnKey::ExpiresAt.field_value(&with_expiry).unwrap(),
            "2025-12-01T08:05:59"
        );
        assert_eq!(ColumnKey::ExpiresAt.display(&record()), "N/A");
        assert!(ColumnKey::ExpiresAt.field_value(&record()).is_none());
    }

    #[test]
    fn test_text_predicate_is_case_insensitive_substring() {
        let predicate = ColumnKey::Name.definition().predicate("DOE").unwrap().unwrap();
        assert!(predicate.matches(Some("John Doe")));
        assert!(!predicate.matches(Some("Jane Roe")));
        assert!(!predicate.matches(None));
    }

    #[test]
    fn test_enumerated_predicate_is_exact() {
        let def = ColumnKey::IsActive.definition();
        let predicate = def.predicate("true").unwrap().unwrap();
        assert!(predicate.matches(Some("true")));
        assert!(!predicate.matches(Some("false")));

        assert_eq!(
            def.predicate("tru").unwrap_err(),
            FilterError::UnknownOption {
                column: ColumnKey::IsActive,
                value: "tru".into()
            }
        );
        assert!(def.predicate("Yes").is_err());
    }

    #[test]
    fn test_empty_value_builds_no_predicate() {
        assert_eq!(ColumnKey::Email.definition().predicate("").unwrap(), None);
        assert_eq!(ColumnKey::IsActive.definition().predicate("").unwrap(), None);
    }

    #[test]
    fn test_unfilterable_column() {
        let def = ColumnDef {
            filter: FilterKind::None,
            ..*ColumnKey::Name.definition()
        };
        assert!(!def.is_filterable());
        assert!(EMPLOYEE_COLUMNS.iter().all(ColumnDef::is_filterable));
        assert_eq!(
            def.predicate("x").unwrap_err(),
            FilterError::NotFilterable(ColumnKey::Name)
        );
    }

    #[test]
    fn test_next_option_cycles_then_clears() {
        let def = ColumnKey::IsActive.definition();
        assert_eq!(def.next_option(None), Some("true"));
        assert_eq!(def.next_option(Some("true")), Some("false"));
        assert_eq!(def.next_option(Some("false")), None);
        assert_eq!(ColumnKey::Name.definition().next_option(None), None);
    }
}
