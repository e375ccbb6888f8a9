use crate::app::App;
use crate::chat_message::render_messages;
use crate::constants::{APP_TITLE, INPUT_PLACEHOLDER};
use crate::controller::ChatState;
use crate::ui::field_scroll;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &mut App, chat: &ChatState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),    // Messages
                Constraint::Length(1), // Typing / recording strip
                Constraint::Length(3), // Input
            ]
            .as_ref(),
        )
        .split(area);

    draw_messages(f, chunks[0], app, chat);
    app.status_indicator
        .render(f, chunks[1], chat.is_reply_pending(), chat.is_recording());
    draw_input(f, chunks[2], chat);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &mut App, chat: &ChatState) {
    if chat.messages().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(format!("Start a conversation with {}", APP_TITLE)),
            Line::from("Your messages will appear here"),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let lines = render_messages(chat.messages(), area.width);
    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    app.scroll.update(total_lines, area.height);

    f.render_widget(Paragraph::new(lines).scroll((app.scroll.offset(), 0)), area);

    if app.scroll.show_jump_button() {
        let label = " ↓ latest (End) ";
        let width = (label.width() as u16).min(area.width);
        f.render_widget(
            Paragraph::new(Span::styled(
                label,
                Style::default().fg(Color::Black).bg(Color::Cyan),
            )),
            Rect {
                x: area.x + area.width - width,
                y: area.y + area.height.saturating_sub(1),
                width,
                height: 1,
            },
        );
    }
}

fn draw_input(f: &mut Frame<'_>, area: Rect, chat: &ChatState) {
    let title = if chat.is_recording() {
        Line::from(Span::styled(
            " ● Recording (Ctrl+V to stop and send) ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if chat.history().is_recalling() {
        Line::from(Span::styled(
            format!(
                " History {}/{} ",
                chat.history().cursor() + 1,
                chat.history().len()
            ),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(" Message ")
    };

    let content = if chat.input().is_empty() {
        Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(chat.input().to_string(), Style::default().fg(Color::White))
    };

    let border_color = if chat.is_reply_pending() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let (scroll_offset, cursor_x) = field_scroll(chat.input(), area);

    f.render_widget(
        Paragraph::new(Line::from(content))
            .scroll((0, scroll_offset))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(border_color)),
            ),
        area,
    );

    f.set_cursor_position((cursor_x, area.y + 1));
}
