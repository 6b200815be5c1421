//! Fullscreen terminal UI (TUI).
//!
//! Single-threaded event loop: key presses and finished catalog fetches are
//! handled one at a time on this thread, fetches themselves run on the tokio
//! runtime and report back over a channel.

pub(crate) mod input;
pub(crate) mod screens;
pub(crate) mod state;
pub(crate) mod theme;
pub(crate) mod widgets;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::catalog::{spawn_fetch, CatalogClient, FetchOutcome};
use crate::config::Config;
use state::*;
use theme::Theme;

const FRAME_TIME: Duration = Duration::from_millis(16);

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub fn run_tui(rt: &tokio::runtime::Runtime, config: &Config) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let client = CatalogClient::from_config(&config.catalog);
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchOutcome>();

    let mut app = App::new(config);
    app.start();

    loop {
        terminal.draw(|f| draw(f.area(), f, &app))?;

        let mut fetched = false;
        while let Ok(outcome) = fetch_rx.try_recv() {
            let completion = app.finish_fetch(outcome);
            tracing::debug!(?completion, "fetch finished");
            fetched = true;
        }
        if fetched {
            continue;
        }

        if let Some(action) = app.pending_action.take() {
            match action {
                Action::Fetch(ticket) => {
                    spawn_fetch(rt.handle(), client.clone(), ticket, fetch_tx.clone());
                }
                Action::OpenUrl(url) => {
                    if let Err(err) = open::that(&url) {
                        tracing::warn!(%url, error = %err, "could not open browser");
                        app.set_error(
                            "Could not open browser",
                            format!("{err}\n\nLink: {url}"),
                        );
                    }
                }
            }
            continue;
        }

        let timeout = FRAME_TIME.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && input::handle_key(&mut app, key)? {
                    break;
                }
            }
        }

        if app.last_tick.elapsed() >= FRAME_TIME {
            app.last_tick = std::time::Instant::now();
            app.animation.advance();
        }
    }

    Ok(())
}

fn draw(area: Rect, f: &mut ratatui::Frame, app: &App) {
    let theme = Theme::default();

    let outer_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(0),    // content
        ])
        .split(area);

    widgets::header::draw_header(
        outer_layout[0],
        f,
        &theme,
        app.browse.snapshot(),
        app.animation.spinner_char(),
    );

    let inner = outer_layout[1];
    screens::browse::draw_browse(inner, f, app, theme);

    let overlay = if app.screen == Screen::ErrorModal {
        app.error_return_screen
    } else {
        app.screen
    };
    if overlay == Screen::Detail {
        screens::detail::draw_detail(inner, f, app, theme);
    }
    if app.screen == Screen::ErrorModal {
        screens::error::draw_error_modal(inner, f, app, theme);
    }
}
