use crate::app_state::AppState;
use crate::constants::APP_TITLE;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Asks before leaving; `leaving` is the screen the dialog was opened from.
pub fn draw_quit_confirm(f: &mut Frame<'_>, area: Rect, leaving: AppState) {
    let width = 54.min(area.width);
    let height = 7.min(area.height);
    let panel = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let dialog = Paragraph::new(prompt_lines(leaving))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Quit {} ", APP_TITLE))
                .border_style(Style::default().fg(Color::LightYellow)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, panel);
    f.render_widget(dialog, panel);
}

fn prompt_lines(leaving: AppState) -> Vec<Line<'static>> {
    let detail = match leaving {
        AppState::Chat => "Your conversation is saved and you stay logged in.",
        AppState::Register => "The registration form will be discarded.",
        _ => "You can log in again next time.",
    };

    vec![
        Line::styled(
            format!("Leave {}?", APP_TITLE),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(detail, Style::default().fg(Color::Gray)),
        Line::from(""),
        Line::styled("y / Enter quit    n / Esc stay", Style::default().fg(Color::LightCyan)),
    ]
}
