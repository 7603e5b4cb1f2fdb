use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::request::method::HttpMethod;

/// Normalized result of a service call.
///
/// Any status the server sends back lands here, 4xx and 5xx included; it is
/// up to the caller to look at `status` before trusting `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub method: HttpMethod,
    pub status: u16,
    pub body: Option<String>,
}

impl ServiceResponse {
    /// Empty bodies are stored as `None`.
    pub fn new(method: HttpMethod, status: u16, body: String) -> Self {
        let body = if body.is_empty() { None } else { Some(body) };
        Self { method, status, body }
    }

    /// True iff a body was received.
    pub fn is_valid(&self) -> bool {
        self.body.is_some()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON. An absent body decodes like `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self.body.as_deref().unwrap_or("null");
        Ok(serde_json::from_str(raw)?)
    }
}
