use crate::constants::{LISTENING_HINT, SPINNER_FRAMES};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One-line strip under the messages: typing dots while a reply is staged,
/// a recording hint while dictating.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self { spinner_idx: 0 }
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn line(&self, reply_pending: bool, recording: bool) -> Line<'static> {
        let spinner = SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()];

        if recording {
            return Line::from(vec![
                Span::styled("● ", Style::default().fg(Color::Red).add_modifier(Modifier::SLOW_BLINK)),
                Span::styled(LISTENING_HINT, Style::default().fg(Color::Cyan)),
            ]);
        }

        if reply_pending {
            // Three dots that take turns lighting up.
            let lit = self.spinner_idx % 3;
            let mut spans = vec![
                Span::styled(spinner.to_string(), Style::default().fg(Color::Gray)),
                Span::raw(" "),
            ];
            for dot in 0..3 {
                let color = if dot == lit { Color::Cyan } else { Color::DarkGray };
                spans.push(Span::styled("• ", Style::default().fg(color)));
            }
            return Line::from(spans);
        }

        Line::from("")
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, reply_pending: bool, recording: bool) {
        frame.render_widget(
            Paragraph::new(self.line(reply_pending, recording))
                .alignment(ratatui::layout::Alignment::Left),
            area,
        );
    }
}
