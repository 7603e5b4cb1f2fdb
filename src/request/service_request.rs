use std::collections::BTreeMap;

use serde_json::Value;

use crate::request::method::HttpMethod;

/// Path and query parameters, iterated in key order.
pub type Parameters = BTreeMap<String, Value>;

/// Describes one service call: where, how, with what.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub path: String,
    pub method: HttpMethod,
    pub parameters: Parameters,
    pub body: Option<String>,
}

impl ServiceRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self { path: path.into(), method, parameters: Parameters::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn params(mut self, parameters: Parameters) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Raw body, sent as-is with `Content-Type: application/json`.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn json_body(self, body: &Value) -> Self {
        self.body(body.to_string())
    }
}
