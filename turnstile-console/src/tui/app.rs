// turnstile-console/src/tui/app.rs
// Terminal console state and key handling

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use shared::EmployeeRecord;
use tokio::sync::mpsc;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

use crate::filter::{ColumnFilterState, ColumnKey, FilterError, FilterKind};
use crate::grid::{self, GridView, Pagination, SortOrder};
use crate::notice::{Notice, NoticeBoard, Notifier};
use crate::roster::{
    EditRequest, LoadOutcome, LoadTicket, MutationOutcome, MutationTicket, RosterController,
};

/// How long a notice stays in the footer
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Finished remote work, sent back from spawned tasks
#[derive(Debug)]
pub enum Completion {
    Loaded(LoadOutcome),
    Mutated(MutationOutcome),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a search for the column
    Searching(ColumnKey),
    /// Waiting for y/n on the pending delete
    ConfirmDelete,
}

pub struct App {
    pub roster: RosterController,
    pub filters: ColumnFilterState,
    pub sort: Option<SortOrder>,
    pub pagination: Pagination,
    /// Row index within the current page
    pub selected_row: usize,
    pub selected_column: ColumnKey,
    pub input: Input,
    pub input_mode: InputMode,
    /// Record shown in the details panel after an edit request
    pub editing: Option<EditRequest>,
    pub show_logs: bool,
    pub logger_state: TuiWidgetState,
    pub should_quit: bool,
    notices: Arc<NoticeBoard>,
    current_notice: Option<(Notice, Instant)>,
    completions: mpsc::UnboundedSender<Completion>,
}

impl App {
    pub fn new(
        roster: RosterController,
        notices: Arc<NoticeBoard>,
        page_size: usize,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            roster,
            filters: ColumnFilterState::new(),
            sort: None,
            pagination: Pagination::new(page_size),
            selected_row: 0,
            selected_column: ColumnKey::Name,
            input: Input::default(),
            input_mode: InputMode::default(),
            editing: None,
            show_logs: true,
            logger_state: TuiWidgetState::new(),
            should_quit: false,
            notices,
            current_notice: None,
            completions,
        }
    }

    /// Issue the initial load
    pub fn start(&mut self) {
        if let Some(ticket) = self.roster.mount() {
            self.spawn_load(ticket);
        }
        self.tick();
    }

    pub fn view(&self) -> GridView {
        grid::render(
            self.roster.state(),
            &self.filters,
            self.sort,
            &self.pagination,
        )
    }

    pub fn selected_record(&self) -> Option<EmployeeRecord> {
        grid::page_records(
            self.roster.state().records(),
            &self.filters,
            self.sort,
            &self.pagination,
        )
        .get(self.selected_row)
        .map(|record| (*record).clone())
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.current_notice.as_ref().map(|(notice, _)| notice)
    }

    /// Pick up new notices and expire the shown one
    pub fn tick(&mut self) {
        if let Some(latest) = self.notices.drain().pop() {
            self.current_notice = Some((latest, Instant::now()));
        }
        if self
            .current_notice
            .as_ref()
            .is_some_and(|(_, shown)| shown.elapsed() > NOTICE_TTL)
        {
            self.current_notice = None;
        }
    }

    pub fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Loaded(outcome) => {
                self.roster.apply_load(outcome);
                self.clamp_selection();
            }
            Completion::Mutated(outcome) => {
                // Failures are already reported as notices
                if let Ok(Some(ticket)) = self.roster.settle_mutation(outcome) {
                    self.spawn_load(ticket);
                }
            }
        }
        self.tick();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Searching(column) => self.handle_search_key(column, key),
            InputMode::ConfirmDelete => self.handle_confirm_key(key),
        }
        self.tick();
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.editing.take().is_none() {
                    self.should_quit = true;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row += 1;
                self.clamp_selection();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.prev();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected_column = self.selected_column.next();
            }
            KeyCode::Char('/') | KeyCode::Enter => self.open_filter(),
            KeyCode::Char('x') => {
                self.filters.clear(self.selected_column);
                self.reset_position();
            }
            KeyCode::Char('X') => {
                self.filters.clear_all();
                self.reset_position();
            }
            KeyCode::Char('s') => {
                self.sort = SortOrder::cycle(self.sort, self.selected_column);
                self.reset_position();
            }
            KeyCode::Char('n') => {
                let total = self.view().total;
                self.pagination.next(total);
                self.selected_row = 0;
            }
            KeyCode::Char('p') => {
                self.pagination.prev();
                self.selected_row = 0;
            }
            KeyCode::Char('r') => {
                if let Some(ticket) = self.roster.refresh() {
                    self.spawn_load(ticket);
                }
            }
            KeyCode::Char('e') => {
                if let Some(record) = self.selected_record() {
                    self.editing = Some(self.roster.request_edit(&record));
                }
            }
            KeyCode::Char('t') => {
                if let Some(record) = self.selected_record()
                    && let Ok(ticket) = self.roster.request_toggle_active(&record)
                {
                    self.spawn_mutation(ticket);
                }
            }
            KeyCode::Char('d') => {
                if let Some(record) = self.selected_record() {
                    self.roster.request_delete(&record);
                    self.input_mode = InputMode::ConfirmDelete;
                }
            }
            KeyCode::Char('L') => self.show_logs = !self.show_logs,
            KeyCode::PageUp => self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => {}
        }
    }

    /// Text columns open the search input; enumerated columns step through
    /// their values and then back to unfiltered
    fn open_filter(&mut self) {
        let column = self.selected_column;
        let def = column.definition();
        if !def.is_filterable() {
            self.notices.info(&FilterError::NotFilterable(column).to_string());
            return;
        }
        match def.filter {
            FilterKind::Text => {
                self.input = Input::new(self.filters.candidate(column).to_string());
                self.input_mode = InputMode::Searching(column);
            }
            FilterKind::Enumerated(_) => {
                match def.next_option(self.filters.active(column)) {
                    Some(value) => {
                        if let Err(e) = self.filters.confirm(column, value) {
                            self.notices.error(&e.to_string());
                        }
                    }
                    None => self.filters.clear(column),
                }
                self.reset_position();
            }
            FilterKind::None => {}
        }
    }

    fn handle_search_key(&mut self, column: ColumnKey, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.filters.set_candidate(column, self.input.value());
                if let Err(e) = self.filters.confirm_candidate(column) {
                    self.notices.error(&e.to_string());
                }
                self.input_mode = InputMode::Normal;
                self.reset_position();
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                self.filters.set_candidate(column, self.input.value());
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if let Ok(ticket) = self.roster.confirm_delete() {
                    self.spawn_mutation(ticket);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.roster.cancel_delete();
            }
            _ => {}
        }
    }

    /// Back to the first row of the first page after rows are filtered or reordered
    fn reset_position(&mut self) {
        self.pagination.first();
        self.selected_row = 0;
    }

    fn clamp_selection(&mut self) {
        let view = self.view();
        self.pagination = view.pagination;
        self.selected_row = self.selected_row.min(view.rows.len().saturating_sub(1));
    }

    fn spawn_load(&self, ticket: LoadTicket) {
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = ticket.run().await;
            completions.send(Completion::Loaded(outcome)).ok();
        });
    }

    fn spawn_mutation(&self, ticket: MutationTicket) {
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = ticket.run().await;
            completions.send(Completion::Mutated(outcome)).ok();
        });
    }
}
