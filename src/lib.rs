//! # Cloud Connector Library
//!
//! Talks to a cloud platform's REST API on behalf of an OAuth2 client:
//! obtains a bearer token with the client-credentials grant, caches it
//! until it expires, and dispatches service calls with templated URIs.
//!
//! Modules:
//! - `auth` — credentials and the token manager
//! - `cache` — token value and its (instance or shared) slot
//! - `request` — methods, URI building, request and response types
//! - `connector` — construction and dispatch
//! - `config` — connector configuration and YAML loader

pub mod auth;
pub mod cache;
pub mod config;
pub mod connector;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod request;
pub mod tests;
pub mod utils;


pub use crate::cache::token::Token;
pub use crate::cache::token_cache::TokenScope;
pub use crate::config::settings::ConnectorConfig;
pub use crate::connector::Connector;
pub use crate::error::{ConnectorError, ErrorKind};
pub use crate::request::method::HttpMethod;
pub use crate::request::response::ServiceResponse;
pub use crate::request::service_request::{Parameters, ServiceRequest};
pub use crate::request::uri::UriStyle;
