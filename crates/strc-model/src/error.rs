use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {source}")]
    Invalid {
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown or misplaced config keys: {}", keys.join(", "))]
    UnknownKeys { keys: Vec<String> },

    #[error("invalid value for environment variable {name}: {message}")]
    Environment { name: String, message: String },

    #[error("unsupported code_page: {0} (use utf8 or cp932)")]
    UnsupportedCodePage(String),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("{field} must be 1-origin positive integers: {columns:?}")]
    InvalidColumns {
        field: &'static str,
        columns: Vec<i64>,
    },

    #[error("invalid timeout {0:?} (use <n>ms, <n>s, <n>m or <n>h)")]
    InvalidTimeout(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
