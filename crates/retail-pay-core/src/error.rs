//! Error types for the retail payment SDK.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Signing error: {message}")]
    Signing { message: String },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Missing or empty credential, or a configuration source that failed to load.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::ConfigFile(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
