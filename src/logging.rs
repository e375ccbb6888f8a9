// src/logging.rs

use crate::config::Config;
use crate::errors::{ParrotError, ParrotResult};
use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};

/// Starts file logging under `<data_dir>/logs`. The terminal belongs to the UI,
/// so nothing is ever written to stdout or stderr.
///
/// `RUST_LOG` overrides the configured level. Keep the returned handle alive
/// for the lifetime of the program or buffered lines are lost.
pub fn init_logging(config: &Config) -> ParrotResult<LoggerHandle> {
    let log_dir = config.data_path().join("logs");

    Logger::try_with_env_or_str(&config.log_level)
        .map_err(|e| ParrotError::config_error(format!("Invalid log specification: {}", e)))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename("parrot-chat")
                .suppress_timestamp(),
        )
        .append()
        .write_mode(WriteMode::BufferAndFlush)
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| ParrotError::config_error(format!("Failed to start logger: {}", e)))
}
