//! Authenticated platform API client.
//!
//! Carries the access token and application secret, executes JSON requests
//! against the platform host, and builds the `access_token` / `pay_sig`
//! query strings that platform endpoints expect.

use std::sync::{Arc, RwLock};

use reqwest::Method;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::signing::{self, AppSecret};
use crate::{Error, Result};

/// Immutable credential snapshot.
///
/// Rotation replaces the whole snapshot, so a reader always sees a token and
/// secret that were installed together.
#[derive(Clone)]
pub struct Credentials {
    access_token: String,
    app_secret: AppSecret,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .field("app_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create a credential snapshot, rejecting empty values.
    #[allow(clippy::result_large_err)]
    pub fn new(access_token: impl Into<String>, app_secret: impl Into<String>) -> Result<Self> {
        let access_token = access_token.into();
        let app_secret = AppSecret::new(app_secret);
        if access_token.is_empty() {
            return Err(Error::config("access token is empty"));
        }
        if app_secret.is_empty() {
            return Err(Error::config("app secret is empty"));
        }
        Ok(Self {
            access_token,
            app_secret,
        })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn app_secret(&self) -> &AppSecret {
        &self.app_secret
    }
}

/// Platform API client.
///
/// Safe to share across threads behind an `Arc`. Credential rotation swaps an
/// `Arc<Credentials>` under a write lock; every operation works on the
/// snapshot it read at the start.
pub struct ApiClient {
    base_url: String,
    credentials: RwLock<Arc<Credentials>>,
    /// HTTP sender for API requests.
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create a client from validated configuration.
    #[allow(clippy::result_large_err)]
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.resolved_base_url();
        let credentials = Credentials::new(config.access_token, config.app_secret)?;

        Ok(Self {
            base_url,
            credentials: RwLock::new(Arc::new(credentials)),
            http_client: reqwest::Client::new(),
        })
    }

    /// Replace the HTTP sender. Timeouts, proxies and redirect policy are
    /// whatever the supplied client is configured with.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current credential snapshot.
    pub fn credentials(&self) -> Arc<Credentials> {
        let guard = self
            .credentials
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn access_token(&self) -> String {
        self.credentials().access_token().to_string()
    }

    pub fn app_secret(&self) -> AppSecret {
        self.credentials().app_secret().clone()
    }

    /// Atomically install a new credential snapshot.
    pub fn replace_credentials(&self, credentials: Credentials) {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(credentials);
        info!("Client credentials rotated");
    }

    /// Rotate the access token, keeping the current application secret.
    #[allow(clippy::result_large_err)]
    pub fn set_access_token(&self, access_token: impl Into<String>) -> Result<()> {
        let access_token = access_token.into();
        self.update(|current| Credentials::new(access_token, current.app_secret.expose()))
    }

    /// Rotate the application secret, keeping the current access token.
    #[allow(clippy::result_large_err)]
    pub fn set_app_secret(&self, app_secret: impl Into<String>) -> Result<()> {
        let app_secret = app_secret.into();
        self.update(|current| Credentials::new(current.access_token.as_str(), app_secret))
    }

    /// Read-modify-write under a single write lock so concurrent partial
    /// rotations cannot interleave.
    #[allow(clippy::result_large_err)]
    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&Credentials) -> Result<Credentials>,
    {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = f(&**guard)?;
        *guard = Arc::new(next);
        info!("Client credentials rotated");
        Ok(())
    }

    /// Send a JSON request to `base_url + path`.
    ///
    /// The response is returned as-is whatever its status; interpreting the
    /// platform's response envelope is up to the caller. Dropping the future
    /// cancels the request.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: impl Into<reqwest::Body>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, path = %strip_query(path), "Sending API request");

        let response = self
            .http_client
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        debug!(status = %response.status(), path = %strip_query(path), "API response received");
        Ok(response)
    }

    /// `path?access_token=<token>`.
    pub fn build_authenticated_url(&self, path: &str) -> String {
        let credentials = self.credentials();
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("access_token", credentials.access_token())
            .finish();
        format!("{}?{}", path, query)
    }

    /// `path?access_token=<token>&pay_sig=<hex>`, the pay signature computed
    /// over `path` and `body` with the current application secret.
    #[allow(clippy::result_large_err)]
    pub fn build_signed_url(&self, path: &str, body: &[u8]) -> Result<String> {
        let credentials = self.credentials();
        let pay_sig = signing::pay_signature(path, body, credentials.app_secret())?;
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("access_token", credentials.access_token())
            .append_pair("pay_sig", &pay_sig)
            .finish();
        Ok(format!("{}?{}", path, query))
    }

    /// Pay signature over `uri` and `body` with the current application secret.
    #[allow(clippy::result_large_err)]
    pub fn pay_signature(&self, uri: &str, body: &[u8]) -> Result<String> {
        signing::pay_signature(uri, body, self.credentials().app_secret())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

/// Path without its query string, so tokens never reach the logs.
fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}
