//! Default locations for the config and log files

use std::path::PathBuf;

const LOG_FILE_NAME: &str = "readme-disclaimer.log";

/// Get the data directory (~/.readme-disclaimer)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".readme-disclaimer"))
        .unwrap_or_else(|| PathBuf::from(".readme-disclaimer"))
}

/// Get the config file path (~/.readme-disclaimer/config.toml)
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Get the default log file path, relative to the working directory
pub fn default_log_file() -> PathBuf {
    PathBuf::from(LOG_FILE_NAME)
}
