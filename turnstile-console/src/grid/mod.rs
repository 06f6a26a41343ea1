//! Grid renderer
//!
//! Pure derivation of the visible table from the roster, the filter state,
//! the sort order and the page. Holds no state of its own.

mod sort;

use std::ops::Range;

use shared::{EmployeeId, EmployeeRecord};

use crate::filter::{ColumnFilterState, ColumnKey, Segment};
use crate::roster::{RosterPhase, RosterState, RowAction};

pub use sort::{SortDirection, SortOrder};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page over the filtered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Never less than 1, even with no rows
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn first(&mut self) {
        self.page = 1;
    }

    pub fn next(&mut self, total: usize) {
        self.page = (self.page + 1).min(self.page_count(total));
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Copy with the page clamped to `[1, page_count]`
    pub fn clamped(&self, total: usize) -> Self {
        Self {
            page: self.page.clamp(1, self.page_count(total)),
            page_size: self.page_size,
        }
    }

    /// Index range of the current page within `total` rows
    pub fn range(&self, total: usize) -> Range<usize> {
        let page = self.clamped(total).page;
        let start = ((page - 1) * self.page_size).min(total);
        start..(start + self.page_size).min(total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column: ColumnKey,
    pub title: &'static str,
    pub width: u16,
    pub sort: Option<SortDirection>,
    pub filtered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub column: ColumnKey,
    pub segments: Vec<Segment>,
}

impl GridCell {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_highlighted(&self) -> bool {
        self.segments.iter().any(|s| s.matched)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub id: EmployeeId,
    pub cells: Vec<GridCell>,
    pub actions: [RowAction; 3],
}

impl GridRow {
    pub fn cell(&self, column: ColumnKey) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.column == column)
    }
}

/// Everything needed to draw one frame of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub headers: Vec<HeaderCell>,
    /// Rows of the current page
    pub rows: Vec<GridRow>,
    /// Rows passing the filters, across all pages
    pub total: usize,
    /// Records fetched
    pub fetched: usize,
    pub pagination: Pagination,
    pub page_count: usize,
    pub loading: bool,
    pub phase: RosterPhase,
}

impl GridView {
    pub fn row_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.id.as_str()).collect()
    }
}

/// Records passing every active filter, sorted if a sort is set, otherwise
/// in fetch order
pub fn visible_records<'a>(
    records: &'a [EmployeeRecord],
    filters: &ColumnFilterState,
    sort: Option<SortOrder>,
) -> Vec<&'a EmployeeRecord> {
    let mut visible: Vec<&EmployeeRecord> =
        records.iter().filter(|record| filters.matches(record)).collect();
    if let Some(sort) = sort {
        sort.apply(&mut visible);
    }
    visible
}

/// Records on the current page
pub fn page_records<'a>(
    records: &'a [EmployeeRecord],
    filters: &ColumnFilterState,
    sort: Option<SortOrder>,
    pagination: &Pagination,
) -> Vec<&'a EmployeeRecord> {
    let visible = visible_records(records, filters, sort);
    let range = pagination.range(visible.len());
    visible[range].to_vec()
}

pub fn render(
    roster: &RosterState,
    filters: &ColumnFilterState,
    sort: Option<SortOrder>,
    pagination: &Pagination,
) -> GridView {
    let visible = visible_records(roster.records(), filters, sort);
    let total = visible.len();
    let pagination = pagination.clamped(total);

    let headers = ColumnKey::ALL
        .iter()
        .map(|&column| {
            let def = column.definition();
            HeaderCell {
                column,
                title: def.title,
                width: def.width,
                sort: sort.filter(|s| s.column == column).map(|s| s.direction),
                filtered: filters.active(column).is_some(),
            }
        })
        .collect();

    let rows = visible[pagination.range(total)]
        .iter()
        .map(|record| render_row(record, filters))
        .collect();

    GridView {
        headers,
        rows,
        total,
        fetched: roster.len(),
        pagination,
        page_count: pagination.page_count(total),
        loading: roster.is_loading(),
        phase: roster.phase(),
    }
}

fn render_row(record: &EmployeeRecord, filters: &ColumnFilterState) -> GridRow {
    GridRow {
        id: record.uuid.clone(),
        cells: ColumnKey::ALL
            .iter()
            .map(|&column| GridCell {
                column,
                segments: filters.highlight(column, record),
            })
            .collect(),
        actions: RowAction::for_record(record),
    }
}
