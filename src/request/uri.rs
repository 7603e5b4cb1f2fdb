//! Target URI construction.
//!
//! Two styles are supported:
//! - `flat_query`: `base_url + version + path`, every parameter goes to the query string
//! - `path_template`: `base_url + path`, `{name}` placeholders are filled from the
//!   parameters first and only the leftovers go to the query string
//!
//! Keys and values are percent-encoded, pairs are joined with `&`, and null
//! parameters are skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::Value;

use crate::request::service_request::Parameters;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z0-9,]+)\}").expect("placeholder regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UriStyle {
    FlatQuery,
    #[default]
    PathTemplate,
}

pub fn build_uri(style: UriStyle, base_url: &str, version: &str, path: &str, parameters: &Parameters) -> String {
    match style {
        UriStyle::FlatQuery => flat_query_uri(base_url, version, path, parameters),
        UriStyle::PathTemplate => path_template_uri(base_url, path, parameters),
    }
}

pub fn flat_query_uri(base_url: &str, version: &str, path: &str, parameters: &Parameters) -> String {
    let target = format!("{}{}{}", base_url, version, path);
    append_query(target, parameters.iter())
}

/// Fills `{name}` placeholders from `parameters`. A placeholder without a
/// matching non-null parameter is left as is.
pub fn path_template_uri(base_url: &str, path: &str, parameters: &Parameters) -> String {
    let mut consumed: HashSet<String> = HashSet::new();
    let expanded = PLACEHOLDER.replace_all(path, |caps: &Captures| {
        let name = &caps[1];
        match parameters.get(name).and_then(render_value) {
            Some(value) => {
                consumed.insert(name.to_owned());
                encode_path_value(&value)
            }
            None => caps[0].to_owned(),
        }
    });

    let target = format!("{}{}", base_url, expanded);
    append_query(
        target,
        parameters
            .iter()
            .filter(|(key, _)| !consumed.contains(key.as_str())),
    )
}

fn append_query<'a>(target: String, pairs: impl Iterator<Item = (&'a String, &'a Value)>) -> String {
    let query = pairs
        .filter_map(|(key, value)| {
            render_value(value).map(|v| format!("{}={}", urlencoding::encode(key), urlencoding::encode(&v)))
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        return target;
    }
    let separator = if target.contains('?') { '&' } else { '?' };
    format!("{}{}{}", target, separator, query)
}

/// Strings are written raw, other scalars and containers as JSON text, null not at all.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// commas are legal in a path segment and carry id lists
fn encode_path_value(value: &str) -> String {
    urlencoding::encode(value).replace("%2C", ",")
}
