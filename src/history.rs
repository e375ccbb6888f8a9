// src/history.rs

/// Previously submitted inputs plus the cursor used for up/down recall.
///
/// The cursor ranges over `[0, len]`; `len` means nothing is recalled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl InputHistory {
    pub fn new(entries: Vec<String>) -> Self {
        let cursor = entries.len();
        Self { entries, cursor }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True while an entry is loaded into the input.
    pub fn is_recalling(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        self.cursor = self.entries.len();
    }

    /// Steps toward older entries. At the oldest entry the cursor stays put and
    /// the oldest entry is returned again.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Steps toward newer entries. Moving past the newest entry yields an empty
    /// string; once there, further calls do nothing.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries.get(self.cursor).map_or("", String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> InputHistory {
        InputHistory::new(vec!["one".into(), "two".into(), "three".into()])
    }

    #[test]
    fn test_loaded_history_starts_past_the_end() {
        let h = history();
        assert_eq!(h.cursor(), 3);
        assert!(!h.is_recalling());
    }

    #[test]
    fn test_recall_previous_walks_back_and_sticks_at_oldest() {
        let mut h = history();
        assert_eq!(h.recall_previous(), Some("three"));
        assert_eq!(h.recall_previous(), Some("two"));
        assert_eq!(h.recall_previous(), Some("one"));
        assert_eq!(h.recall_previous(), Some("one"));
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn test_recall_next_returns_to_empty_input() {
        let mut h = history();
        h.recall_previous();
        h.recall_previous();
        assert_eq!(h.recall_next(), Some("three"));
        assert_eq!(h.recall_next(), Some(""));
        assert_eq!(h.cursor(), 3);
        assert_eq!(h.recall_next(), None);
        assert_eq!(h.cursor(), 3);
    }

    #[test]
    fn test_cursor_never_leaves_bounds() {
        let mut h = history();
        for step in 0..20 {
            if step % 3 == 0 {
                h.recall_next();
            } else {
                h.recall_previous();
            }
            assert!(h.cursor() <= h.len());
        }
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut h = history();
        h.recall_previous();
        h.push("four");
        assert_eq!(h.cursor(), 4);
        assert_eq!(h.entries().last().map(String::as_str), Some("four"));
    }

    #[test]
    fn test_empty_history_recalls_nothing() {
        let mut h = InputHistory::default();
        assert_eq!(h.recall_previous(), None);
        assert_eq!(h.recall_next(), None);
        assert_eq!(h.cursor(), 0);
    }
}
