// turnstile-console/src/tui/ui.rs
// Frame layout - header, employee table, footer, log pane

use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use super::app::{App, InputMode};
use crate::filter::ColumnKey;
use crate::grid::{GridRow, GridView};
use crate::notice::NoticeLevel;
use crate::roster::{DeleteConfirmation, RosterPhase};

/// Background of matched search text
const MATCH_BG: Color = Color::Rgb(255, 192, 105);

const HELP: &str = "←→ column  ↑↓ row  / search  x clear  s sort  n/p page  r refresh  e edit  t toggle  d delete  L logs  q quit";

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Table (+ details, logs)
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let view = app.view();
    draw_header(f, app, &view, chunks[0]);

    let body = if app.show_logs {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(8)])
            .split(chunks[1]);
        draw_logs(f, app, split[1]);
        split[0]
    } else {
        chunks[1]
    };

    match &app.editing {
        Some(request) => {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(body);
            draw_table(f, app, &view, split[0]);
            draw_details(f, &request.record, split[1]);
        }
        None => draw_table(f, app, &view, body),
    }

    draw_footer(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, view: &GridView, area: Rect) {
    let status = match view.phase {
        RosterPhase::Unauthorized => Span::styled(
            " Not signed in ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        _ if view.loading => Span::styled(
            " Loading... ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        _ => Span::styled(
            format!(" {} of {} employees ", view.total, view.fetched),
            Style::default().fg(Color::Green),
        ),
    };

    let mut spans = vec![
        Span::raw(" Turnstile "),
        Span::styled(" Employees ", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        status,
    ];
    if let Some(searched) = app.filters.last_searched() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} ~ \"{}\"", searched.column.definition().title, searched.text),
            Style::default().fg(MATCH_BG),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn draw_table(f: &mut Frame, app: &App, view: &GridView, area: Rect) {
    let title = format!(" Page {}/{} ", view.pagination.page(), view.page_count);
    let block = Block::default().title(title).borders(Borders::ALL);

    if view.phase == RosterPhase::Unauthorized {
        let message = app
            .roster
            .state()
            .last_error()
            .unwrap_or("No authentication token found");
        let text = vec![
            Line::from(Span::styled(message, Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from("Run `turnstile-console login <username> <password>` and restart."),
        ];
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let mut header_cells: Vec<Cell> = view
        .headers
        .iter()
        .map(|h| {
            let mut title = h.title.to_string();
            if h.filtered {
                title.push_str(" *");
            }
            if let Some(direction) = h.sort {
                title.push(' ');
                title.push_str(direction.arrow());
            }
            let style = if h.column == app.selected_column {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Cell::from(title).style(style)
        })
        .collect();
    header_cells.push(Cell::from("Action").style(Style::default().add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).bottom_margin(1);

    let rows = view.rows.iter().map(table_row);

    let mut widths: Vec<Constraint> = view
        .headers
        .iter()
        .map(|h| Constraint::Percentage(h.width))
        .collect();
    widths.push(Constraint::Min(10));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !view.rows.is_empty() {
        state.select(Some(app.selected_row.min(view.rows.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn table_row(row: &GridRow) -> Row<'static> {
    let mut cells: Vec<Cell> = row
        .cells
        .iter()
        .map(|cell| {
            let spans: Vec<Span> = cell
                .segments
                .iter()
                .map(|segment| {
                    if segment.matched {
                        Span::styled(
                            segment.text.clone(),
                            Style::default().fg(Color::Black).bg(MATCH_BG),
                        )
                    } else {
                        Span::raw(segment.text.clone())
                    }
                })
                .collect();
            let style = match cell.column {
                ColumnKey::IsActive if cell.text() == "Yes" => Style::default().fg(Color::Green),
                ColumnKey::IsActive => Style::default().fg(Color::Red),
                _ => Style::default(),
            };
            Cell::from(Line::from(spans)).style(style)
        })
        .collect();

    let actions: Vec<&str> = row.actions.iter().map(|action| action.label()).collect();
    cells.push(Cell::from(actions.join(" | ")).style(Style::default().fg(Color::DarkGray)));
    Row::new(cells)
}

fn draw_details(f: &mut Frame, record: &shared::EmployeeRecord, area: Rect) {
    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<8}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::Yellow)),
        ])
    };
    let text = vec![
        field("UUID", record.uuid.to_string()),
        field("Name", record.name.clone()),
        field("Email", record.email.clone()),
        field("Active", ColumnKey::IsActive.display(record)),
        field("Expires", ColumnKey::ExpiresAt.display(record)),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let details = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Edit employee ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(details, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    match app.input_mode {
        InputMode::Searching(column) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" Search {} (Enter to apply, Esc to cancel) ", column.definition().title));
            let width = area.width.max(3) - 3;
            let scroll = app.input.visual_scroll(width as usize);
            let input = Paragraph::new(app.input.value())
                .style(Style::default().fg(Color::Yellow))
                .scroll((0, scroll as u16))
                .block(block);
            f.render_widget(input, area);
            f.set_cursor_position((
                area.x + ((app.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
                area.y + 1,
            ));
        }
        InputMode::ConfirmDelete => {
            let prompt = app
                .roster
                .pending_delete()
                .map(delete_prompt)
                .unwrap_or_default();
            let paragraph = Paragraph::new(prompt).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Delete employee ")
                    .border_style(Style::default().fg(Color::Red)),
            );
            f.render_widget(paragraph, area);
        }
        InputMode::Normal => {
            let line = match app.notice() {
                Some(notice) => {
                    let color = match notice.level {
                        NoticeLevel::Success => Color::Green,
                        NoticeLevel::Info => Color::Cyan,
                        NoticeLevel::Error => Color::Red,
                    };
                    Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
                }
                None => Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
            };
            f.render_widget(
                Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
                area,
            );
        }
    }
}

fn delete_prompt(confirmation: &DeleteConfirmation) -> String {
    format!(
        "{} ({})  [y] Yes  [n] No",
        confirmation.prompt(),
        confirmation.record.name
    )
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use shared::{Ack, EmployeeId, EmployeeRecord};
    use tokio::sync::mpsc;
    use turnstile_client::{AccessToken, ClientResult, DirectoryApi, StaticCredential};

    use crate::notice::NoticeBoard;
    use crate::roster::{LoadOutcome, RosterController};

    struct EmptyDirectory;

    #[async_trait]
    impl DirectoryApi for EmptyDirectory {
        async fn list(&self, _token: &AccessToken) -> ClientResult<Vec<EmployeeRecord>> {
            Ok(Vec::new())
        }

        async fn set_active(
            &self,
            _id: &EmployeeId,
            _active: bool,
            _token: &AccessToken,
        ) -> ClientResult<Ack> {
            Ok(Ack::default())
        }

        async fn remove(&self, _id: &EmployeeId, _token: &AccessToken) -> ClientResult<Ack> {
            Ok(Ack::default())
        }
    }

    fn app(credential: StaticCredential) -> App {
        let notices = Arc::new(NoticeBoard::default());
        let roster =
            RosterController::new(Arc::new(EmptyDirectory), Arc::new(credential), notices.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(roster, notices, 10, tx);
        app.show_logs = false;
        app
    }

    fn loaded(records: Vec<EmployeeRecord>) -> App {
        let mut app = app(StaticCredential::new("token"));
        let ticket = app.roster.mount().unwrap();
        app.roster.apply_load(LoadOutcome {
            token: ticket.token(),
            result: Ok(records),
        });
        app
    }

    fn render(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_draw_table_rows() {
        let app = loaded(vec![
            EmployeeRecord::new("1", "John Doe", "john@example.com", true),
            EmployeeRecord::new("2", "Jane Roe", "jane@example.com", false),
        ]);
        let text = screen(&render(&app));

        assert!(text.contains("2 of 2 employees"));
        assert!(text.contains("Expiration Date"));
        assert!(text.contains("John Doe"));
        assert!(text.contains("jane@example.com"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Revoke access"));
        assert!(text.contains("Grant access"));
        assert!(text.contains("Page 1/1"));
    }

    #[test]
    fn test_draw_highlights_matches() {
        let mut app = loaded(vec![EmployeeRecord::new(
            "1",
            "John Doe",
            "john@example.com",
            true,
        )]);
        app.filters.confirm(ColumnKey::Name, "doe").unwrap();

        let terminal = render(&app);
        let buffer = terminal.backend().buffer();
        let highlighted: String = buffer
            .content()
            .iter()
            .filter(|cell| cell.bg == MATCH_BG)
            .map(|cell| cell.symbol())
            .collect();
        assert_eq!(highlighted, "Doe");
        assert!(screen(&terminal).contains("Name ~ \"doe\""));
    }

    #[test]
    fn test_draw_unauthorized() {
        let mut app = app(StaticCredential::absent());
        app.start();
        let text = screen(&render(&app));

        assert!(text.contains("Not signed in"));
        assert!(text.contains("No authentication token found"));
        assert!(text.contains("turnstile-console login"));
    }

    #[test]
    fn test_draw_delete_prompt() {
        let mut app = loaded(vec![EmployeeRecord::new(
            "2",
            "Jane Roe",
            "jane@example.com",
            false,
        )]);
        let record = app.selected_record().unwrap();
        app.roster.request_delete(&record);
        app.input_mode = InputMode::ConfirmDelete;

        let text = screen(&render(&app));
        assert!(text.contains("Are you sure to delete this employee? (Jane Roe)"));
    }
}
