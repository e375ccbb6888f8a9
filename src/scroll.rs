// src/scroll.rs

/// Scroll position of the message pane, measured in rendered rows.
///
/// While the view sits at the bottom it follows new content; once the user
/// scrolls up it stays put and offers a jump back to the latest message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTracker {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
    threshold: u16,
}

impl ScrollTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            offset: 0,
            content_height: 0,
            viewport_height: 0,
            threshold,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.max_offset().saturating_sub(self.offset) <= self.threshold
    }

    pub fn show_jump_button(&self) -> bool {
        !self.is_at_bottom()
    }

    /// Called on every render with the current layout.
    pub fn update(&mut self, content_height: u16, viewport_height: u16) {
        let following = self.is_at_bottom();
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        if following {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.offset = self.offset.saturating_add(rows).min(self.max_offset());
    }

    pub fn jump_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }
}
