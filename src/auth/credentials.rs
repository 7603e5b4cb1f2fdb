use std::collections::HashMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{ConnectorError, Result};
use crate::utils::constants::{CREDENTIAL_CLIENT_ID, CREDENTIAL_SECRET};

/// OAuth2 client credentials. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }

    /// Reads `clientId` and `secret` from a config map. Fails naming the
    /// first missing key.
    pub fn from_map(config: &HashMap<String, String>) -> Result<Self> {
        let client_id = required(config, CREDENTIAL_CLIENT_ID)?;
        let client_secret = required(config, CREDENTIAL_SECRET)?;
        Ok(Self::new(client_id, client_secret))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `Basic base64(client_id:client_secret)`
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw.as_bytes()))
    }
}

fn required(config: &HashMap<String, String>, key: &str) -> Result<String> {
    config
        .get(key)
        .cloned()
        .ok_or_else(|| ConnectorError::MissingConfigKey(key.to_owned()))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}
