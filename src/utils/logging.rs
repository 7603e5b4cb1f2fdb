use clap::ValueEnum;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::config::settings::{ConnectorConfig, LogFormat, LoggingConfig};

/// Verbosity accepted by `--log-level` / `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Resolves the effective logging config: CLI level wins over the file,
/// missing section falls back to `info` / compact.
pub fn resolve(config: &ConnectorConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let base = config.logging.clone().unwrap_or_default();
    match arg_log_level {
        Some(level) => LoggingConfig::new(LevelFilter::from(level).to_string(), base.format),
        None => base,
    }
}

pub fn run(config: &ConnectorConfig, arg_log_level: Option<LogLevel>) {
    init_logging(&resolve(config, arg_log_level));
}

/// Filter built from `level`, which may be a plain level or a full directive
/// list such as `cloud_connector=debug,reqwest=warn`. Invalid directives are
/// skipped; with none left the filter admits `info` and above.
pub fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(level)
}

/// Installs the global subscriber writing to stderr. Returns false when a
/// subscriber was already installed.
pub fn init_logging(cfg: &LoggingConfig) -> bool {
    let format = match cfg.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(format.with_filter(level_filter(&cfg.level)))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(logging: Option<LoggingConfig>) -> ConnectorConfig {
        let mut cfg = ConnectorConfig::new("http://a", "http://o", "", HashMap::new());
        cfg.logging = logging;
        cfg
    }

    #[test]
    fn cli_level_overrides_file_level() {
        let cfg = config(Some(LoggingConfig::new("warn".into(), LogFormat::Json)));
        let resolved = resolve(&cfg, Some(LogLevel::Debug));
        assert_eq!(resolved.level, "debug");
        assert_eq!(resolved.format, LogFormat::Json);
    }

    #[test]
    fn missing_section_defaults_to_info_compact() {
        let resolved = resolve(&config(None), None);
        assert_eq!(resolved.level, "info");
        assert_eq!(resolved.format, LogFormat::Compact);
    }

    #[test]
    fn cli_names_are_lowercase() {
        assert_eq!(LogLevel::from_str("warn", false), Ok(LogLevel::Warn));
        assert!(LogLevel::from_str("verbose", false).is_err());
    }

    #[test]
    fn filter_follows_level_and_directives() {
        assert_eq!(level_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(level_filter("error,cloud_connector=trace").max_level_hint(), Some(LevelFilter::TRACE));
        assert_eq!(level_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }
}
