use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::util::paths::{config_path, default_log_file};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_CREATE_MESSAGE: &str = "Create README.md with disclaimer";
pub const DEFAULT_UPDATE_MESSAGE: &str = "Update README.md with disclaimer";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Missing access token (set GITHUB_TOKEN or `token` in the config file)")]
    MissingToken,
    #[error("Missing account name (pass --account, set GITHUB_ACCOUNT or `account` in the config file)")]
    MissingAccount,
}

/// Run configuration, built once at startup and passed to the patcher
#[derive(Clone)]
pub struct Config {
    /// Access token sent as a bearer token on API requests
    pub token: String,
    /// Account whose repositories are patched
    pub account: String,
    /// REST API root
    pub api_base_url: String,
    /// Host serving raw file contents
    pub raw_base_url: String,
    /// Log file, truncated on every run
    pub log_file: PathBuf,
    /// Compute patches without writing them
    pub dry_run: bool,
    /// Commit message for newly created READMEs
    pub create_message: String,
    /// Commit message for updated READMEs
    pub update_message: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() {
            "<unset>"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("Config")
            .field("token", &token)
            .field("account", &self.account)
            .field("api_base_url", &self.api_base_url)
            .field("raw_base_url", &self.raw_base_url)
            .field("log_file", &self.log_file)
            .field("dry_run", &self.dry_run)
            .field("create_message", &self.create_message)
            .field("update_message", &self.update_message)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            account: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            log_file: default_log_file(),
            dry_run: false,
            create_message: DEFAULT_CREATE_MESSAGE.to_string(),
            update_message: DEFAULT_UPDATE_MESSAGE.to_string(),
        }
    }
}

/// TOML representation of commit messages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlMessages {
    pub create: Option<String>,
    pub update: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub token: Option<String>,
    pub account: Option<String>,
    pub api_base_url: Option<String>,
    pub raw_base_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub dry_run: Option<bool>,
    pub messages: Option<TomlMessages>,
}

/// Values taken from the environment and command line.
/// `None` leaves the file/default value in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub account: Option<String>,
    pub log_file: Option<PathBuf>,
    pub dry_run: bool,
}

impl Config {
    /// Build the configuration from defaults, the config file and overrides.
    ///
    /// An explicit `path` must exist and parse. Without one, the default
    /// location (~/.readme-disclaimer/config.toml) is used when present.
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        match path {
            Some(path) => config.apply_toml(Self::read_file(path)?),
            None => {
                let default_path = config_path();
                if default_path.exists() {
                    config.apply_toml(Self::read_file(&default_path)?);
                }
            }
        }

        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge file values on top of the current ones
    pub fn apply_toml(&mut self, toml_config: TomlConfig) {
        if let Some(token) = toml_config.token {
            self.token = token;
        }
        if let Some(account) = toml_config.account {
            self.account = account;
        }
        if let Some(url) = toml_config.api_base_url {
            self.api_base_url = url;
        }
        if let Some(url) = toml_config.raw_base_url {
            self.raw_base_url = url;
        }
        if let Some(log_file) = toml_config.log_file {
            self.log_file = log_file;
        }
        if let Some(dry_run) = toml_config.dry_run {
            self.dry_run = dry_run;
        }
        if let Some(messages) = toml_config.messages {
            if let Some(create) = messages.create {
                self.create_message = create;
            }
            if let Some(update) = messages.update {
                self.update_message = update;
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(token) = overrides.token {
            self.token = token;
        }
        if let Some(account) = overrides.account {
            self.account = account;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = log_file;
        }
        // A flag can only switch dry-run on
        self.dry_run |= overrides.dry_run;
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.account.trim().is_empty() {
            return Err(ConfigError::MissingAccount);
        }
        Ok(())
    }
}
