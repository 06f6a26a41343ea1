// turnstile-console/src/grid/sort.rs
// Explicit column sort

use std::cmp::Ordering;

use shared::EmployeeRecord;

use crate::filter::ColumnKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Descending => "▼",
            SortDirection::Ascending => "▲",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: ColumnKey,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Next sort after activating `column`'s header.
    ///
    /// A new column starts descending, then ascending, then unsorted.
    /// Columns that cannot be sorted leave the current order alone.
    pub fn cycle(current: Option<SortOrder>, column: ColumnKey) -> Option<SortOrder> {
        if !column.definition().sortable {
            return current;
        }
        match current {
            Some(SortOrder {
                column: c,
                direction: SortDirection::Descending,
            }) if c == column => Some(SortOrder {
                column,
                direction: SortDirection::Ascending,
            }),
            Some(SortOrder {
                column: c,
                direction: SortDirection::Ascending,
            }) if c == column => None,
            _ => Some(SortOrder {
                column,
                direction: SortDirection::Descending,
            }),
        }
    }

    /// Records without an expiration sort last in either direction
    pub fn compare(&self, a: &EmployeeRecord, b: &EmployeeRecord) -> Ordering {
        let ordering = match self.column {
            ColumnKey::Name => return self.directed(compare_text(&a.name, &b.name)),
            ColumnKey::Email => return self.directed(compare_text(&a.email, &b.email)),
            ColumnKey::IsActive => return self.directed(a.is_active.cmp(&b.is_active)),
            ColumnKey::ExpiresAt => (a.expires_at, b.expires_at),
        };
        match ordering {
            (Some(x), Some(y)) => self.directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable sort; equal rows keep fetch order
    pub fn apply(&self, records: &mut [&EmployeeRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
