// src/reply.rs

use rand::Rng;
use std::time::Duration;

/// Status lines shown by the placeholder, in order, before the reply lands.
pub const THINKING_STAGES: [&str; 3] = [
    "Analyzing your request...",
    "Accessing neural networks...",
    "Formulating response...",
];

/// Delays between placeholder stages and before the final reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTiming {
    pub stage_delay: Duration,
    pub reply_delay: Duration,
}

impl Default for ReplyTiming {
    fn default() -> Self {
        Self {
            stage_delay: Duration::from_millis(800),
            reply_delay: Duration::from_millis(1200),
        }
    }
}

impl ReplyTiming {
    /// Time from submission until the reply replaces the placeholder.
    pub fn total(&self) -> Duration {
        self.stage_delay * (THINKING_STAGES.len() as u32 - 1) + self.reply_delay
    }
}

/// All four canned replies for `input`.
pub fn reply_templates(input: &str) -> [String; 4] {
    [
        format!("I've processed your request about \"{}\". Here's what I found...", input),
        format!("Fascinating question about \"{}\"! Let me share some insights.", input),
        format!("Based on my analysis of \"{}\", I recommend considering...", input),
        format!("\"{}\" is an interesting topic. Here's what you should know...", input),
    ]
}

/// Picks one of the canned replies uniformly at random.
pub fn generate_reply(input: &str) -> String {
    let [a, b, c, d] = reply_templates(input);
    match rand::rng().random_range(0..4) {
        0 => a,
        1 => b,
        2 => c,
        _ => d,
    }
}
