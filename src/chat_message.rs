use crate::models::{Message, Sender};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Renders one message as framed, pre-wrapped lines. User messages are
/// indented to the right of bot messages.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let style = base_style(message);
    let indent = indent(message.sender);

    render_header(&mut lines, message, style, indent);
    render_content(&mut lines, message, width, style, indent);
    render_footer(&mut lines, style, indent);

    lines
}

fn indent(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "    ",
        Sender::Bot => "",
    }
}

fn base_style(message: &Message) -> Style {
    let style = Style::default().fg(match message.sender {
        Sender::User => Color::Rgb(255, 223, 128), // Warmer yellow
        Sender::Bot => Color::Rgb(144, 238, 144),  // Softer green
    });

    if message.is_placeholder() {
        style.add_modifier(Modifier::DIM | Modifier::ITALIC)
    } else {
        style
    }
}

fn render_header(lines: &mut Vec<Line<'static>>, message: &Message, style: Style, indent: &str) {
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─".to_string(), style),
        Span::styled(
            message.sender.label().to_string(),
            style.add_modifier(Modifier::BOLD),
        ),
    ]));
}

fn render_content(
    lines: &mut Vec<Line<'static>>,
    message: &Message,
    width: u16,
    style: Style,
    indent: &str,
) {
    // indent + "│ " gutter
    let gutter = indent.width() + 2;
    let wrap_width = (width as usize).saturating_sub(gutter).max(1);

    for wrapped_line in wrap(&message.text, wrap_width) {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped_line.to_string(), style),
        ]));
    }
}

fn render_footer(lines: &mut Vec<Line<'static>>, style: Style, indent: &str) {
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));
}

/// All messages with a blank line between each.
pub fn render_messages(messages: &[Message], width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in messages {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, width));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_message_is_framed_and_labeled() {
        let lines = render_message(&Message::reply("short", "abc"), 40);
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "┌─Chatbot");
        assert_eq!(text(&lines[1]), "│ short");
        assert_eq!(text(&lines[2]), "╰─");
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let msg = Message::user("one two three four five six seven eight", "abc");
        let lines = render_message(&msg, 20);
        assert!(lines.len() > 3);
        for line in &lines {
            assert!(text(line).width() <= 20);
        }
    }

    #[test]
    fn test_messages_are_separated_by_blank_lines() {
        let msgs = vec![Message::user("a", "1"), Message::reply("b", "1")];
        let lines = render_messages(&msgs, 40);
        assert_eq!(lines.len(), 7);
        assert_eq!(text(&lines[3]), "");
    }
}
