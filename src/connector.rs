use std::collections::HashMap;
use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::auth::credentials::Credentials;
use crate::auth::token_manager::TokenManager;
use crate::cache::token_cache::TokenCache;
use crate::config::settings::ConnectorConfig;
use crate::error::{ConnectorError, Result};
use crate::helpers::time::{system_clock, Clock};
use crate::observability::metrics::get_metrics;
use crate::request::response::ServiceResponse;
use crate::request::service_request::ServiceRequest;
use crate::request::uri::{build_uri, UriStyle};
use crate::utils::constants::CONTENT_TYPE_JSON;

/// Client for one REST API: keeps a bearer token fresh and dispatches
/// service calls with it.
///
/// ```no_run
/// # async fn demo() -> cloud_connector::error::Result<()> {
/// use std::collections::HashMap;
/// use cloud_connector::{Connector, ServiceRequest};
///
/// let credentials = HashMap::from([
///     ("clientId".to_owned(), "my-client".to_owned()),
///     ("secret".to_owned(), "my-secret".to_owned()),
/// ]);
/// let connector = Connector::new("https://api.example.com", "https://oauth.example.com", "/v1", &credentials)?;
/// let response = connector.call_service(ServiceRequest::get("/users/{id}").param("id", 42)).await?;
/// println!("{} {:?}", response.status, response.body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Connector {
    base_url: String,
    oauth_url: String,
    version: String,
    uri_style: UriStyle,
    client: Client,
    tokens: TokenManager,
}

impl Connector {
    pub fn new(base_url: &str, oauth_url: &str, version: &str, credentials: &HashMap<String, String>) -> Result<Self> {
        Self::from_config(&ConnectorConfig::new(base_url, oauth_url, version, credentials.clone()))
    }

    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        Self::from_config_with_clock(config, system_clock())
    }

    pub fn from_config_with_clock(config: &ConnectorConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let credentials = Credentials::from_map(&config.credentials)?;
        if config.base_url.trim().is_empty() {
            return Err(ConnectorError::InvalidConfig("base_url must not be empty".into()));
        }
        if config.oauth_url.trim().is_empty() {
            return Err(ConnectorError::InvalidConfig("oauth_url must not be empty".into()));
        }

        let client = Client::builder()
            .connect_timeout(config.http.connect_timeout())
            .timeout(config.http.request_timeout())
            .build()
            .map_err(|e| ConnectorError::InvalidConfig(format!("failed to build http client: {}", e)))?;

        let cache = TokenCache::for_scope(config.token_scope, &config.oauth_url, credentials.client_id());
        info!(
            "connector for '{}' ready, client '{}', token scope {:?}, uri style {:?}",
            config.base_url,
            credentials.client_id(),
            config.token_scope,
            config.uri_style
        );
        let tokens = TokenManager::new(credentials, &config.oauth_url, client.clone(), cache, clock);

        Ok(Self {
            base_url: config.base_url.clone(),
            oauth_url: config.oauth_url.clone(),
            version: config.version.clone(),
            uri_style: config.uri_style,
            client,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn oauth_url(&self) -> &str {
        &self.oauth_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn uri_style(&self) -> UriStyle {
        self.uri_style
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn target_uri(&self, request: &ServiceRequest) -> String {
        build_uri(self.uri_style, &self.base_url, &self.version, &request.path, &request.parameters)
    }

    /// Performs one service call.
    ///
    /// Only transport, token and URL failures are errors. Whatever status the
    /// server answers with, 4xx and 5xx included, comes back as a
    /// [`ServiceResponse`].
    pub async fn call_service(&self, request: ServiceRequest) -> Result<ServiceResponse> {
        let metrics = get_metrics().await;
        let start = Instant::now();
        let method = request.method;

        let authorization = self.tokens.authorization_header_value().await?;

        let target = self.target_uri(&request);
        let url = Url::parse(&target).map_err(|e| ConnectorError::MalformedUrl {
            url: target.clone(),
            reason: e.to_string(),
        })?;
        debug!("{} {}", method, url);

        let mut builder = self
            .client
            .request(method.to_http(), url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON);
        match request.body {
            Some(body) if method.carries_body() => builder = builder.body(body),
            Some(_) => warn!("dropping body of {} request to '{}'", method, request.path),
            None => {}
        }

        let response = builder.send().await.inspect_err(|e| {
            error!("{} '{}' failed: {}", method, target, e);
            metrics.service_requests.with_label_values(&[method.as_str(), "error"]).inc();
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        metrics
            .service_request_duration
            .with_label_values(&[method.as_str()])
            .observe(start.elapsed().as_secs_f64());
        let status_label = status.to_string();
        metrics
            .service_requests
            .with_label_values(&[method.as_str(), status_label.as_str()])
            .inc();
        info!("{} '{}' answered {}", method, request.path, status);

        Ok(ServiceResponse::new(method, status, body))
    }
}
