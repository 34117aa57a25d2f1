// src/logging.rs

use crate::errors::{ChatError, ChatResult};
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Routes `log` output to a file in the working directory. The terminal is
/// owned by the UI while the screen is up, so nothing may write to stdout
/// or stderr; drop the returned handle only at shutdown.
pub fn init(level: &str) -> ChatResult<LoggerHandle> {
    Logger::try_with_str(level)
        .map_err(|e| ChatError::config_error(format!("invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().basename("lunarchat").suppress_timestamp())
        .start()
        .map_err(|e| ChatError::config_error(format!("failed to start logger: {}", e)))
}
