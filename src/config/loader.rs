use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::ConnectorConfig;
use crate::utils::constants::{CREDENTIAL_CLIENT_ID, CREDENTIAL_SECRET};

/// Load and validate config from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConnectorConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    parse_config(&expand_env_vars(&content))
        .with_context(|| format!("invalid config '{}'", path.display()))
}

pub fn parse_config(content: &str) -> Result<ConnectorConfig> {
    let config: ConnectorConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;
    debug!("validating config ...");
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConnectorConfig) -> Result<()> {
    if config.base_url.trim().is_empty() {
        bail!("base_url must not be empty");
    }
    if config.oauth_url.trim().is_empty() {
        bail!("oauth_url must not be empty");
    }
    for key in [CREDENTIAL_CLIENT_ID, CREDENTIAL_SECRET] {
        if !config.credentials.contains_key(key) {
            bail!("credentials: missing required key '{}'", key);
        }
    }
    if config.http.connect_timeout_ms == 0 || config.http.request_timeout_ms == 0 {
        bail!("http timeouts must be greater than zero");
    }
    Ok(())
}

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("env var regex is valid");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
