//! Terminal console
//!
//! Draw, poll input for 100ms, apply finished remote work, repeat. Remote
//! calls run on spawned tasks and report back over a channel, so the table
//! stays responsive while a request hangs.

mod app;
mod ui;

pub use app::{App, Completion, InputMode};
pub use ui::draw;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::ConsoleConfig;
use crate::notice::NoticeBoard;
use crate::roster::RosterController;

type ConsoleTerminal = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(config: ConsoleConfig) -> anyhow::Result<()> {
    let client = config.client_config().build_directory_client()?;
    tracing::info!(api = %client.base_url(), "starting console");

    let notices = Arc::new(NoticeBoard::default());
    let roster = RosterController::new(
        Arc::new(client),
        Arc::new(config.credential_storage()),
        notices.clone(),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(roster, notices, config.page_size, tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &mut app, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut ConsoleTerminal,
    app: &mut App,
    completions: &mut mpsc::UnboundedReceiver<Completion>,
) -> anyhow::Result<()> {
    app.start();

    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            app.handle_key(key);
        }

        while let Ok(completion) = completions.try_recv() {
            app.handle_completion(completion);
        }
        app.tick();

        if app.should_quit {
            tracing::info!("console closed");
            return Ok(());
        }
    }
}
