use thiserror::Error;

/// Coarse classification of a [`ConnectorError`], for callers that only
/// care about which layer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    AuthExchange,
    Decode,
}

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("invalid configuration: missing required key '{0}'")]
    MissingConfigKey(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported http method '{0}'")]
    UnsupportedMethod(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed url '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("token exchange failed: {0}")]
    AuthExchange(String),

    #[error("response body is not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ConnectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectorError::MissingConfigKey(_)
            | ConnectorError::InvalidConfig(_)
            | ConnectorError::UnsupportedMethod(_) => ErrorKind::Configuration,
            ConnectorError::Transport(_) | ConnectorError::MalformedUrl { .. } => {
                ErrorKind::Transport
            }
            ConnectorError::AuthExchange(_) => ErrorKind::AuthExchange,
            ConnectorError::Decode(_) => ErrorKind::Decode,
        }
    }
}

pub type Result<T, E = ConnectorError> = std::result::Result<T, E>;
