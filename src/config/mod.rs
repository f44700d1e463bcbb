mod settings;

pub use settings::{
    Config, ConfigError, ConfigOverrides, TomlConfig, TomlMessages, DEFAULT_API_BASE_URL,
    DEFAULT_CREATE_MESSAGE, DEFAULT_RAW_BASE_URL, DEFAULT_UPDATE_MESSAGE, EXAMPLE_CONFIG,
};
