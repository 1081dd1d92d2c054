//! Client configuration loaded from the environment.
//!
//! Values come from process environment variables, with a `.env` file in the
//! working directory picked up for local development. Loading from `.env` is
//! skipped under test so that tests stay hermetic.

use camino::Utf8PathBuf;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Base URL of the task API.
pub const API_URL_VAR: &str = "TASKDECK_API_URL";
/// Directory holding the persisted session token.
pub const TOKEN_DIR_VAR: &str = "TASKDECK_TOKEN_DIR";
/// Optional per-request timeout in whole seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "TASKDECK_REQUEST_TIMEOUT_SECS";
/// Tracing filter directives.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
/// Default token directory, relative to the working directory.
pub const DEFAULT_TOKEN_DIR: &str = ".taskdeck";
/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration loading failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

/// Settings for the task client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    token_dir: Utf8PathBuf,
    request_timeout: Option<Duration>,
    log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            token_dir: Utf8PathBuf::from(DEFAULT_TOKEN_DIR),
            request_timeout: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            // A missing .env file is the normal case outside development.
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Unset and blank variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the API URL is not an
    /// absolute `http(s)` URL or the timeout is not a positive whole number
    /// of seconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };
        let defaults = Self::default();

        let api_url = match value(API_URL_VAR) {
            Some(raw) => parse_api_url(&raw)?,
            None => defaults.api_url,
        };
        let token_dir = value(TOKEN_DIR_VAR).map_or(defaults.token_dir, Utf8PathBuf::from);
        let request_timeout = value(REQUEST_TIMEOUT_VAR)
            .map(|raw| parse_timeout(&raw))
            .transpose()?;
        let log_filter = value(LOG_FILTER_VAR).unwrap_or(defaults.log_filter);

        Ok(Self {
            api_url,
            token_dir,
            request_timeout,
            log_filter,
        })
    }

    /// Overrides the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the URL is unusable.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }

    /// Overrides the token directory.
    #[must_use]
    pub fn with_token_dir(mut self, token_dir: impl Into<Utf8PathBuf>) -> Self {
        self.token_dir = token_dir.into();
        self
    }

    /// Returns the API base URL without a trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the directory holding the persisted token.
    #[must_use]
    pub fn token_dir(&self) -> &Utf8PathBuf {
        &self.token_dir
    }

    /// Returns the per-request timeout, if one is configured.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns the tracing filter directives.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::invalid(API_URL_VAR, err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            API_URL_VAR,
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(
            REQUEST_TIMEOUT_VAR,
            "timeout must be at least one second",
        )),
        Ok(seconds) => Ok(Duration::from_secs(seconds)),
        Err(err) => Err(ConfigError::invalid(REQUEST_TIMEOUT_VAR, err.to_string())),
    }
}
