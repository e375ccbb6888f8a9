use crate::constants::APP_TITLE;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title on the left, signed-in account on the right.
pub fn draw_header(f: &mut Frame<'_>, area: Rect, email: Option<&str>) {
    let block = Block::default()
        .style(Style::default().fg(Color::LightCyan))
        .borders(Borders::BOTTOM);

    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let title = Paragraph::new(APP_TITLE)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);

    f.render_widget(title, chunks[0]);

    if let Some(email) = email {
        let account = Paragraph::new(email.to_string())
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Right);

        f.render_widget(account, chunks[1]);
    }
}
