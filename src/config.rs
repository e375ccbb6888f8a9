use crate::errors::{ParrotError, ParrotResult};
use crate::reply::ReplyTiming;
use crate::speech::SpeechSettings;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_dir: String,
    pub stage_delay_ms: u64,
    pub reply_delay_ms: u64,
    pub speech_language: String,
    pub speech_continuous: bool,
    pub speech_interim_results: bool,
    pub scroll_threshold: u16,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join("parrot-chat"))
            .unwrap_or_else(|| PathBuf::from(".parrot-chat"));

        Self {
            data_dir: data_dir.to_string_lossy().to_string(),
            stage_delay_ms: 800,
            reply_delay_ms: 1200,
            speech_language: "en-US".to_string(),
            speech_continuous: true,
            speech_interim_results: true,
            scroll_threshold: 2,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn reply_timing(&self) -> ReplyTiming {
        ReplyTiming {
            stage_delay: Duration::from_millis(self.stage_delay_ms),
            reply_delay: Duration::from_millis(self.reply_delay_ms),
        }
    }

    pub fn speech_settings(&self) -> SpeechSettings {
        SpeechSettings {
            continuous: self.speech_continuous,
            interim_results: self.speech_interim_results,
            language: self.speech_language.clone(),
        }
    }
}

/// Loads the config from the user's config directory, writing defaults on first run.
pub fn initialize_config() -> ParrotResult<Config> {
    let config_path = get_config_path()?;
    initialize_config_at(&config_path)
}

pub fn initialize_config_at(config_path: &Path) -> ParrotResult<Config> {
    let config = if config_path.exists() {
        let config_str = fs::read_to_string(config_path).map_err(|e| {
            ParrotError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ParrotError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;
        config
    } else {
        let mut config = Config::default();

        if let Ok(dir) = env::var("PARROT_CHAT_DATA_DIR") {
            config.data_dir = dir;
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ParrotError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        write_config(config_path, &config)?;
        config
    };

    Ok(config)
}

fn get_config_path() -> ParrotResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ParrotError::config_error("Could not determine config directory"))?;

    Ok(config_dir.join("parrot-chat").join("config.json"))
}

fn write_config(config_path: &Path, config: &Config) -> ParrotResult<()> {
    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| ParrotError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(config_path, config_str)
        .map_err(|e| ParrotError::config_error(format!("Failed to write config file: {}", e)))
}

fn validate_config(config: &Config) -> ParrotResult<()> {
    if config.data_dir.trim().is_empty() {
        return Err(ParrotError::config_error("data_dir is required"));
    }

    if config.stage_delay_ms == 0 || config.reply_delay_ms == 0 {
        return Err(ParrotError::config_error(
            "stage_delay_ms and reply_delay_ms must be greater than 0",
        ));
    }

    if config.speech_language.is_empty() {
        return Err(ParrotError::config_error("speech_language is required"));
    }

    if config.log_level.parse::<log::LevelFilter>().is_err() {
        return Err(ParrotError::config_error(format!(
            "Unknown log level: {}",
            config.log_level
        )));
    }

    Ok(())
}
