#[cfg(test)]
mod tests {

    use std::io::Write;

    use serial_test::serial;

    use crate::cache::token_cache::TokenScope;
    use crate::config::loader::{load_config, parse_config};
    use crate::config::settings::LogFormat;
    use crate::connector::Connector;
    use crate::error::{ConnectorError, ErrorKind};
    use crate::request::uri::UriStyle;
    use crate::tests::common::credentials;

    const FULL_YAML: &str = r#"
base_url: "https://api.example.com"
oauth_url: "https://oauth.example.com"
version: "/v1"
credentials:
  clientId: "my-client"
  secret: "my-secret"
uri_style: flat_query
token_scope: shared
http:
  connect_timeout_ms: 1000
  request_timeout_ms: 2500
logging:
  level: debug
  format: json
"#;

    #[test]
    fn parses_full_config() {
        let cfg = parse_config(FULL_YAML).unwrap();
        assert_eq!(cfg.base_url, "https://api.example.com");
        assert_eq!(cfg.version, "/v1");
        assert_eq!(cfg.credentials.get("clientId").map(String::as_str), Some("my-client"));
        assert_eq!(cfg.uri_style, UriStyle::FlatQuery);
        assert_eq!(cfg.token_scope, TokenScope::Shared);
        assert_eq!(cfg.http.connect_timeout_ms, 1000);
        assert_eq!(cfg.http.request_timeout_ms, 2500);
        assert_eq!(cfg.logging.unwrap().format, LogFormat::Json);
    }

    #[test]
    fn optional_sections_default() {
        let cfg = parse_config(
            r#"
base_url: "https://api.example.com"
oauth_url: "https://oauth.example.com"
credentials: { clientId: a, secret: b }
"#,
        )
        .unwrap();
        assert_eq!(cfg.version, "");
        assert_eq!(cfg.uri_style, UriStyle::PathTemplate);
        assert_eq!(cfg.token_scope, TokenScope::Instance);
        assert_eq!(cfg.http.connect_timeout_ms, 5000);
        assert_eq!(cfg.http.request_timeout_ms, 15000);
        assert!(cfg.logging.is_none());
    }

    #[test]
    fn missing_secret_is_rejected_by_loader() {
        let err = parse_config(
            r#"
base_url: "https://api.example.com"
oauth_url: "https://oauth.example.com"
credentials: { clientId: a }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'secret'"), "{}", err);
    }

    #[test]
    fn unknown_uri_style_is_rejected() {
        let yaml = FULL_YAML.replace("flat_query", "fancy");
        assert!(parse_config(&yaml).is_err());
    }

    #[test]
    #[serial]
    fn load_config_expands_environment() {
        std::env::set_var("CC_TEST_CLIENT_ID", "from-env");
        std::env::remove_var("CC_TEST_UNSET_SECRET");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
base_url: "https://api.example.com"
oauth_url: "https://oauth.example.com"
credentials:
  clientId: "${{CC_TEST_CLIENT_ID}}"
  secret: "${{CC_TEST_UNSET_SECRET:fallback}}"
"#
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.credentials.get("clientId").map(String::as_str), Some("from-env"));
        assert_eq!(cfg.credentials.get("secret").map(String::as_str), Some("fallback"));
        std::env::remove_var("CC_TEST_CLIENT_ID");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn connector_requires_client_id() {
        let mut creds = credentials("x");
        creds.remove("clientId");
        let err = Connector::new("https://api", "https://oauth", "/v1", &creds).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, ConnectorError::MissingConfigKey(ref k) if k == "clientId"));
    }

    #[test]
    fn connector_requires_secret() {
        let mut creds = credentials("x");
        creds.remove("secret");
        let err = Connector::new("https://api", "https://oauth", "/v1", &creds).unwrap_err();
        assert!(matches!(err, ConnectorError::MissingConfigKey(ref k) if k == "secret"));
    }

    #[test]
    fn connector_rejects_empty_base_url() {
        let err = Connector::new("  ", "https://oauth", "", &credentials("x")).unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidConfig(_)));
    }

    #[test]
    fn connector_rejects_empty_oauth_url() {
        let err = Connector::new("https://api", "", "/v1", &credentials("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, ConnectorError::InvalidConfig(ref msg) if msg.contains("oauth_url")));
    }

    #[test]
    fn connector_keeps_endpoint_config() {
        let cfg = parse_config(FULL_YAML).unwrap();
        let conn = Connector::from_config(&cfg).unwrap();
        assert_eq!(conn.base_url(), "https://api.example.com");
        assert_eq!(conn.oauth_url(), "https://oauth.example.com");
        assert_eq!(conn.version(), "/v1");
        assert_eq!(conn.uri_style(), UriStyle::FlatQuery);
    }
}
