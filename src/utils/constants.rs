//! Shared constants and invariants

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15000;

// Credential keys
pub const CREDENTIAL_CLIENT_ID: &str = "clientId";
pub const CREDENTIAL_SECRET: &str = "secret";

// Token exchange
pub const TOKEN_PATH: &str = "/token";
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
pub const CONTENT_TYPE_JSON: &str = "application/json";
