// src/conversation.rs

use crate::constants::{HISTORY_KEY_PREFIX, MESSAGES_KEY_PREFIX};
use crate::errors::ParrotResult;
use crate::models::Message;
use crate::storage::KeyValueStore;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Everything persisted for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub history: Vec<String>,
}

#[derive(Clone)]
pub struct ConversationStore {
    store: Arc<dyn KeyValueStore>,
}

fn messages_key(email: &str) -> String {
    format!("{}{}", MESSAGES_KEY_PREFIX, email)
}

fn history_key(email: &str) -> String {
    format!("{}{}", HISTORY_KEY_PREFIX, email)
}

impl ConversationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the conversation for `email`. Missing or unparsable entries load as
    /// empty. Placeholders left behind by an interrupted reply are dropped.
    pub fn load(&self, email: &str) -> ParrotResult<Conversation> {
        let mut messages: Vec<Message> = self.load_list(&messages_key(email))?;
        let history: Vec<String> = self.load_list(&history_key(email))?;

        let before = messages.len();
        messages.retain(|msg| !msg.is_placeholder());
        if messages.len() != before {
            debug!("Dropped {} stale placeholder(s) for {}", before - messages.len(), email);
        }

        Ok(Conversation { messages, history })
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> ParrotResult<Vec<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(list) => Ok(list),
            Err(e) => {
                warn!("Stored {} is unparsable, starting empty: {}", key, e);
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&self, email: &str, messages: &[Message], history: &[String]) -> ParrotResult<()> {
        self.store
            .set(&messages_key(email), &serde_json::to_string(messages)?)?;
        self.store
            .set(&history_key(email), &serde_json::to_string(history)?)?;
        Ok(())
    }

    pub fn clear(&self, email: &str) -> ParrotResult<()> {
        self.store.remove(&messages_key(email))?;
        self.store.remove(&history_key(email))
    }
}
