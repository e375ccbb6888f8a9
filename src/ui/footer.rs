use crate::app::App;
use crate::app_state::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer: the pending notice if there is one, otherwise key hints.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let footer = match &app.notice {
        Some(notice) => Paragraph::new(notice.to_string())
            .style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(instructions(app.state))
            .style(Style::default().fg(Color::LightCyan)),
    };

    f.render_widget(
        footer
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn instructions(state: AppState) -> &'static str {
    match state {
        AppState::Login => "Tab to switch field, Enter to log in, Ctrl+R to register, Esc to quit.",
        AppState::Register => "Tab to switch field, Enter to register, Esc to go back to login.",
        AppState::Chat => {
            "Enter send · ↑/↓ history · Ctrl+V voice · Ctrl+E export · Ctrl+L logout · PgUp/PgDn/End scroll · Esc quit"
        }
        AppState::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
        AppState::Quit => "",
    }
}
