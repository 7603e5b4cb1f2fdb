// tests/common/mod.rs
use std::collections::HashMap;
use std::sync::Arc;

use httpmock::Method::POST;
use httpmock::{Mock, MockServer};
use serde_json::json;

use crate::auth::credentials::Credentials;
use crate::config::settings::ConnectorConfig;
use crate::connector::Connector;
use crate::helpers::time::ManualClock;

pub const T0: i64 = 1_700_000_000_000;
pub const SECRET: &str = "s3cr3t";
pub const OAUTH_PATH: &str = "/oauth";

pub fn credentials(client_id: &str) -> HashMap<String, String> {
    HashMap::from([
        ("clientId".to_owned(), client_id.to_owned()),
        ("secret".to_owned(), SECRET.to_owned()),
    ])
}

/// Config pointing both the API and the token endpoint at `server`.
pub fn config(server: &MockServer, client_id: &str) -> ConnectorConfig {
    ConnectorConfig::new(&server.base_url(), &server.url(OAUTH_PATH), "/v1", credentials(client_id))
}

pub fn connector(config: &ConnectorConfig, clock: &ManualClock) -> Connector {
    Connector::from_config_with_clock(config, Arc::new(clock.clone())).expect("connector")
}

/// Token endpoint answering with a fixed token for `client_id`.
pub async fn mock_token<'a>(server: &'a MockServer, client_id: &str, access_token: &str, expires_in: i64) -> Mock<'a> {
    let basic = Credentials::new(client_id, SECRET).basic_authorization();
    let body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in,
    });
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/token", OAUTH_PATH))
                .header("authorization", basic)
                .header("content-type", "application/x-www-form-urlencoded")
                .body("grant_type=client_credentials");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}
