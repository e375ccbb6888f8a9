// src/ui.rs

pub mod auth;
pub mod chat;
pub mod footer;
pub mod header;
pub mod quit_confirm;

use crate::app::App;
use crate::app_state::AppState;
use crate::controller::ChatState;
use crate::key_handlers::handle_key;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(app: App) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("UI loop failed: {:?}", err);
    }
    res
}

/// Main loop of the application.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // crossterm polling blocks, so it gets its own thread
    tokio::task::spawn_blocking(move || loop {
        let event = match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(event) => Event::Input(event),
                Err(e) => {
                    error!("Failed to read terminal event: {}", e);
                    return;
                }
            },
            Ok(false) => Event::Tick,
            Err(e) => {
                error!("Failed to poll terminal events: {}", e);
                return;
            }
        };
        if tx.blocking_send(event).is_err() {
            return;
        }
    });

    loop {
        let chat_state = app.chat.as_ref().map(|chat| chat.state());
        {
            let mut guard = match &chat_state {
                Some(state) => Some(state.lock().await),
                None => None,
            };
            if let Some(state) = guard.as_mut() {
                app.show_notices(state.take_notices());
            }
            terminal.draw(|f| draw(f, &mut app, guard.as_deref()))?;
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                handle_key(key, &mut app).await;
            }
            Some(Event::Input(_)) => {}
            Some(Event::Tick) => app.status_indicator.update_spinner(),
            None => break,
        }

        if app.state == AppState::Quit {
            break;
        }
    }

    app.shutdown();
    info!("Exiting");
    Ok(())
}

/// Renders the current screen.
pub fn draw(f: &mut Frame<'_>, app: &mut App, chat_state: Option<&ChatState>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Body
                Constraint::Length(2), // Footer
            ]
            .as_ref(),
        )
        .split(f.area());

    header::draw_header(f, chunks[0], chat_state.map(ChatState::email));

    match (app.state, chat_state) {
        (AppState::Login, _) => auth::draw_auth_form(f, chunks[1], &app.form, false),
        (AppState::Register, _) => auth::draw_auth_form(f, chunks[1], &app.form, true),
        (AppState::Chat, Some(state)) => chat::draw_chat(f, chunks[1], app, state),
        (AppState::QuitConfirm, _) => {
            quit_confirm::draw_quit_confirm(f, chunks[1], app.previous_state)
        }
        _ => {}
    }

    footer::draw_footer(f, chunks[2], app);
}

/// Horizontal scroll offset and cursor column for one line of `text` drawn
/// inside a bordered `area`. The cursor never passes the right border.
pub(crate) fn field_scroll(text: &str, area: Rect) -> (u16, u16) {
    let visible_width = area.width.saturating_sub(2);
    let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    let offset = text_width.saturating_sub(visible_width.saturating_sub(1));
    (offset, area.x + 1 + text_width - offset)
}
