// src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParrotError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech recognition error: {0}")]
    Speech(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl ParrotError {
    pub fn storage_error(msg: impl Into<String>) -> Self {
        ParrotError::Storage(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        ParrotError::Config(msg.into())
    }

    pub fn speech_error(msg: impl Into<String>) -> Self {
        ParrotError::Speech(msg.into())
    }

    pub fn export_error(msg: impl Into<String>) -> Self {
        ParrotError::Export(msg.into())
    }
}

pub type ParrotResult<T> = Result<T, ParrotError>;
