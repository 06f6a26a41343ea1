//! Turnstile Console - employee directory for the access-control admin
//!
//! The employee table as a set of plain state machines: the column filter
//! engine, the roster controller that owns the fetched collection, and the
//! grid renderer that derives the visible page from both. The terminal
//! front end in [`tui`] drives them.

pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod logger;
pub mod notice;
pub mod roster;
pub mod tui;

pub use config::ConsoleConfig;
pub use error::RosterError;
pub use filter::{ColumnFilterState, ColumnKey, FilterError};
pub use grid::{GridView, Pagination, SortDirection, SortOrder};
pub use notice::{Notice, NoticeBoard, NoticeLevel, Notifier, TracingNotifier};
pub use roster::{RosterController, RosterPhase, RosterState, RowAction};
