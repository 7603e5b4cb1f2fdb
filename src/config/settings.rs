use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::token_cache::TokenScope;
use crate::request::uri::UriStyle;
use crate::utils::constants::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS};

/// ================================
/// Full connector configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectorConfig {
    pub base_url: String,
    pub oauth_url: String,
    #[serde(default)]
    pub version: String,
    /// requires `clientId` and `secret`
    pub credentials: HashMap<String, String>,
    #[serde(default)]
    pub uri_style: UriStyle,
    #[serde(default)]
    pub token_scope: TokenScope,
    #[serde(default)]
    pub http: HttpConfig,
    pub logging: Option<LoggingConfig>,
}

impl ConnectorConfig {
    pub fn new(base_url: &str, oauth_url: &str, version: &str, credentials: HashMap<String, String>) -> Self {
        Self {
            base_url: base_url.to_owned(),
            oauth_url: oauth_url.to_owned(),
            version: version.to_owned(),
            credentials,
            uri_style: UriStyle::default(),
            token_scope: TokenScope::default(),
            http: HttpConfig::default(),
            logging: None,
        }
    }
}

/// ================================
/// HTTP client timeouts
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// whole-request timeout, covers reading the response
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
