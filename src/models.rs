// src/models.rs

use crate::constants::{MESSAGE_ID_LEN, PLACEHOLDER_ID_PREFIX, RESPONSE_ID_PREFIX};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Label used in exported transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Chatbot",
        }
    }
}

/// Represents a message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub id: String,
}

impl Message {
    pub fn user(text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            id: id.into(),
        }
    }

    /// The transient bot message shown while a reply is being staged.
    pub fn placeholder(text: impl Into<String>, user_id: &str) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            id: format!("{}{}", PLACEHOLDER_ID_PREFIX, user_id),
        }
    }

    pub fn reply(text: impl Into<String>, user_id: &str) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            id: format!("{}{}", RESPONSE_ID_PREFIX, user_id),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.sender == Sender::Bot && self.id.starts_with(PLACEHOLDER_ID_PREFIX)
    }
}

/// User-facing notices, shown in the footer until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SpeechUnsupported,
    NoSpeech,
    InvalidCredentials,
    Registered,
    Exported(PathBuf),
    ExportFailed(String),
    StorageFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SpeechUnsupported => {
                write!(f, "Speech recognition is not supported in this terminal.")
            }
            Notice::NoSpeech => write!(f, "No speech detected or microphone issue. Please try again."),
            Notice::InvalidCredentials => write!(f, "Invalid credentials"),
            Notice::Registered => write!(f, "Registered successfully!"),
            Notice::Exported(path) => write!(f, "Chat exported to {}", path.display()),
            Notice::ExportFailed(reason) => write!(f, "Export failed: {}", reason),
            Notice::StorageFailed(reason) => write!(f, "Could not save: {}", reason),
        }
    }
}

/// Generates a short random base-36 id for a user submission.
pub fn generate_message_id() -> String {
    let mut rng = rand::rng();
    (0..MESSAGE_ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
