use std::sync::Arc;

use http::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::auth::credentials::Credentials;
use crate::cache::token::{Token, TokenResponse};
use crate::cache::token_cache::TokenCache;
use crate::error::{ConnectorError, Result};
use crate::helpers::time::Clock;
use crate::observability::metrics::{get_metrics, OUTCOME_OK, OUTCOME_REJECTED, OUTCOME_TRANSPORT};
use crate::utils::constants::{GRANT_TYPE_CLIENT_CREDENTIALS, TOKEN_PATH};

/// Acquires bearer tokens with the client-credentials grant and caches them
/// until they expire.
#[derive(Debug, Clone)]
pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    client: Client,
    cache: TokenCache,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    pub fn new(
        credentials: Credentials,
        oauth_url: &str,
        client: Client,
        cache: TokenCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let token_url = format!("{}{}", oauth_url.trim_end_matches('/'), TOKEN_PATH);
        Self { credentials, token_url, client, cache, clock }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// True iff a token has been obtained and has not yet expired. Never
    /// waits for an exchange in progress.
    pub async fn is_valid(&self) -> bool {
        self.cached_valid().await.is_some()
    }

    pub async fn current_token(&self) -> Option<Token> {
        self.cache.get().await
    }

    /// Returns a valid token, exchanging credentials first if the cached one
    /// is missing or expired. On failure the cached token is left untouched.
    ///
    /// At most one exchange runs per slot. Callers arriving during it wait for
    /// the refresh lock and then reuse the token it produced.
    pub async fn ensure_valid(&self) -> Result<Token> {
        if let Some(token) = self.cached_valid().await {
            get_metrics().await.token_cache_hits.inc();
            return Ok(token);
        }

        let _refresh = self.cache.refresh_lock().await;
        if let Some(token) = self.cached_valid().await {
            get_metrics().await.token_cache_hits.inc();
            return Ok(token);
        }

        let token = self.exchange().await?;
        self.cache.set(token.clone()).await;
        Ok(token)
    }

    /// `"<token_type> <access_token>"`, refreshing first if needed.
    pub async fn authorization_header_value(&self) -> Result<String> {
        self.ensure_valid()
            .await
            .map(|token| token.authorization_header_value())
    }

    /// Drops the cached token so the next call exchanges again.
    pub async fn invalidate(&self) {
        info!("invalidating cached token for client '{}'", self.credentials.client_id());
        self.cache.clear().await;
    }

    async fn cached_valid(&self) -> Option<Token> {
        let now = self.clock.now_millis();
        self.cache.get().await.filter(|token| token.is_valid_at(now))
    }

    async fn exchange(&self) -> Result<Token> {
        let metrics = get_metrics().await;
        debug!("requesting token from '{}' for client '{}'", self.token_url, self.credentials.client_id());

        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, self.credentials.basic_authorization())
            .form(&[("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS)])
            .send()
            .await
            .inspect_err(|e| {
                error!("token request to '{}' failed: {}", self.token_url, e);
                metrics.token_exchanges.with_label_values(&[OUTCOME_TRANSPORT]).inc();
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("token endpoint rejected client '{}': {}", self.credentials.client_id(), status);
            metrics.token_exchanges.with_label_values(&[OUTCOME_REJECTED]).inc();
            return Err(ConnectorError::AuthExchange(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await.inspect_err(|_| {
            metrics.token_exchanges.with_label_values(&[OUTCOME_TRANSPORT]).inc();
        })?;
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            metrics.token_exchanges.with_label_values(&[OUTCOME_REJECTED]).inc();
            ConnectorError::AuthExchange(format!("malformed token response: {}", e))
        })?;

        let token = Token::from_response(parsed, self.clock.now_millis());
        metrics.token_exchanges.with_label_values(&[OUTCOME_OK]).inc();
        info!(
            "obtained '{}' token for client '{}', expires in {}s",
            token.token_type,
            self.credentials.client_id(),
            token.ttl_seconds
        );
        Ok(token)
    }
}
