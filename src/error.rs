//! Error types for chore-distributor

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Failures while publishing a distribution outside the terminal.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("{0} is only supported on macOS")]
    Unsupported(&'static str),

    #[error("failed to run osascript: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("AppleScript error: {0}")]
    Script(String),

    #[error("failed to send some messages: {}", .0.join("; "))]
    Partial(Vec<String>),

    #[error("template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("{0}")]
    Template(String),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
