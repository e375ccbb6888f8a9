use crate::app::AuthForm;
use crate::app_state::AuthField;
use crate::ui::field_scroll;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Login and register share one form; only the title and accent differ.
pub fn draw_auth_form(f: &mut Frame<'_>, area: Rect, form: &AuthForm, registering: bool) {
    let (title, accent) = if registering {
        ("Register", Color::Blue)
    } else {
        ("Login", Color::Green)
    };

    let panel = centered(area, 50, 9);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(accent));
    f.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(panel);

    let masked = "*".repeat(form.password.chars().count());
    draw_field(f, rows[0], "Email", &form.email, form.focus == AuthField::Email, accent);
    draw_field(f, rows[1], "Password", &masked, form.focus == AuthField::Password, accent);

    let (row, value) = match form.focus {
        AuthField::Email => (rows[0], form.email.as_str()),
        AuthField::Password => (rows[1], masked.as_str()),
    };
    let (_, cursor_x) = field_scroll(value, row);
    f.set_cursor_position((cursor_x, row.y + 1));
}

fn draw_field(f: &mut Frame<'_>, area: Rect, label: &str, value: &str, focused: bool, accent: Color) {
    let border_style = if focused {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let (offset, _) = field_scroll(value, area);
    let field = Paragraph::new(Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(Color::White),
    )))
    .scroll((0, offset))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string())
            .border_style(border_style),
    );

    f.render_widget(field, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
