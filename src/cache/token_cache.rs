use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

use crate::cache::token::Token;

/// Where a connector keeps its bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    /// One token per connector instance.
    #[default]
    Instance,
    /// One token per (oauth url, client id) for the whole process.
    Shared,
}

/// Token slot plus the lock that serializes refreshes of it.
///
/// Cloning the cache clones the handles, not the token: every clone observes
/// and refreshes the same slot. Readers only touch `token`, so they never
/// wait behind an exchange holding `refresh`.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    token: Arc<RwLock<Option<Token>>>,
    refresh: Arc<Mutex<()>>,
}

// Process-wide slots for `TokenScope::Shared`, keyed by "{oauth_url}#{client_id}"
// with any trailing '/' trimmed from the url.
static SHARED_SLOTS: LazyLock<std::sync::Mutex<HashMap<String, TokenCache>>> =
    LazyLock::new(|| std::sync::Mutex::new(HashMap::new()));

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide slot for `key`, creating it on first use.
    /// Shared slots live until the process exits.
    pub fn shared(key: &str) -> Self {
        // the map only ever grows, a poisoned lock still holds usable slots
        let mut slots = SHARED_SLOTS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slots
            .entry(key.to_owned())
            .or_insert_with(|| {
                debug!("creating shared token slot '{}'", key);
                TokenCache::new()
            })
            .clone()
    }

    pub fn for_scope(scope: TokenScope, oauth_url: &str, client_id: &str) -> Self {
        match scope {
            TokenScope::Instance => Self::new(),
            TokenScope::Shared => Self::shared(&format!("{}#{}", oauth_url.trim_end_matches('/'), client_id)),
        }
    }

    /// Takes the refresh lock. Only one holder at a time may exchange
    /// credentials for this slot; reads through [`TokenCache::get`] proceed
    /// while it is held.
    pub async fn refresh_lock(&self) -> MutexGuard<'_, ()> {
        self.refresh.lock().await
    }

    pub async fn get(&self) -> Option<Token> {
        self.token.read().await.clone()
    }

    pub async fn set(&self, token: Token) {
        *self.token.write().await = Some(token);
    }

    pub async fn clear(&self) {
        self.token.write().await.take();
    }

    pub fn same_slot(&self, other: &TokenCache) -> bool {
        Arc::ptr_eq(&self.token, &other.token)
    }
}
