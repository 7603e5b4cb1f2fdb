use serde::Deserialize;

/// Bearer token as issued by the OAuth2 token endpoint.
///
/// A token is only ever built from a complete token response, so all four
/// fields always come from the same exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub issued_at_millis: i64, // UNIX TIMESTAMP, ms
    pub ttl_seconds: i64,
}

impl Token {
    pub fn new(access_token: String, token_type: String, issued_at_millis: i64, ttl_seconds: i64) -> Self {
        Self { access_token, token_type, issued_at_millis, ttl_seconds }
    }

    pub fn from_response(response: TokenResponse, issued_at_millis: i64) -> Self {
        Self::new(response.access_token, response.token_type, issued_at_millis, response.expires_in)
    }

    pub fn expires_at_millis(&self) -> i64 {
        self.issued_at_millis
            .saturating_add(self.ttl_seconds.saturating_mul(1000))
    }

    /// A token is valid strictly before its expiry instant.
    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        now_millis < self.expires_at_millis()
    }

    /// Value for the `Authorization` header, e.g. `Bearer abc123`.
    pub fn authorization_header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// JSON body returned by `POST {oauth_url}/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
