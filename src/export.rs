// src/export.rs

use crate::errors::{ParrotError, ParrotResult};
use crate::models::Message;
use chrono::{Local, NaiveDate};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Plain-text transcript, one `"<You|Chatbot>: <text>"` line per message.
pub fn transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}: {}", msg.sender.label(), msg.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("chatbot-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes today's transcript into `dir` and returns the file's path.
pub fn export_transcript(dir: &Path, messages: &[Message]) -> ParrotResult<PathBuf> {
    if messages.is_empty() {
        return Err(ParrotError::export_error("nothing to export yet"));
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(Local::now().date_naive()));
    fs::write(&path, transcript(messages))?;

    info!("Exported {} messages to {}", messages.len(), path.display());
    Ok(path)
}
