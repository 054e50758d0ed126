//! Client configuration.
//!
//! Credentials come from explicit values, the process environment (with an
//! optional `.env` file), or a layered config file overlaid by environment
//! variables.

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Default platform API host.
pub const DEFAULT_BASE_URL: &str = "https://api.weixin.qq.com";

/// Prefix shared by all configuration environment variables.
pub const ENV_PREFIX: &str = "RETAIL_PAY";

/// Construction parameters for [`ApiClient`](crate::api::ApiClient).
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// API host. Falls back to [`DEFAULT_BASE_URL`] when unset or empty.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Interface access token, appended to authenticated URLs.
    #[serde(default)]
    pub access_token: String,
    /// Application secret used to compute pay signatures.
    #[serde(default)]
    pub app_secret: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("app_secret", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            base_url: None,
            access_token: access_token.into(),
            app_secret: app_secret.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `RETAIL_PAY_ACCESS_TOKEN` and `RETAIL_PAY_APP_SECRET` (required)
    /// and `RETAIL_PAY_BASE_URL` (optional). A `.env` file is honoured if present.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    #[allow(clippy::result_large_err)]
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |suffix: &str| {
            let name = format!("{ENV_PREFIX}_{suffix}");
            lookup(&name)
                .ok_or_else(|| Error::config(format!("{name} environment variable not set")))
        };

        let config = Self {
            base_url: lookup(&format!("{ENV_PREFIX}_BASE_URL")),
            access_token: required("ACCESS_TOKEN")?,
            app_secret: required("APP_SECRET")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, overlaid by `RETAIL_PAY_*` environment variables.
    ///
    /// The file format is inferred from its extension (TOML, JSON, YAML, ...).
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_env(path.as_ref(), None)
    }

    /// `env` replaces the process environment as the overlay source when given.
    #[allow(clippy::result_large_err)]
    fn from_file_with_env(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty credentials.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.access_token.is_empty() {
            return Err(Error::config("access token is empty"));
        }
        if self.app_secret.is_empty() {
            return Err(Error::config("app secret is empty"));
        }
        Ok(())
    }

    /// Base URL with the platform default applied.
    pub fn resolved_base_url(&self) -> String {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        }
    }
}
