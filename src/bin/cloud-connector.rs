use clap::arg;
use clap::command;
use clap::Parser;
use cloud_connector::config::loader::load_config;
use cloud_connector::observability::metrics::get_metrics;
use cloud_connector::utils::logging;
use cloud_connector::utils::logging::LogLevel;
use cloud_connector::{Connector, HttpMethod, ServiceRequest};
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "cloud-connector.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
    /// print prometheus metrics after the call
    #[arg(long)]
    metrics: bool,
    /// GET, POST, PUT, PATCH or DELETE
    method: HttpMethod,
    /// request path, may contain `{name}` placeholders
    path: String,
    /// path or query parameter, `key=value`; values that parse as JSON keep their type
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, Value)>,
    /// raw request body
    #[arg(long)]
    body: Option<String>,
}

fn parse_param(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{}'", raw))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let config = load_config(&args.config)?;
    logging::run(&config, args.log_level);

    // -------------------------------
    // 2. Build connector
    // -------------------------------

    let connector = Connector::from_config(&config).context("failed to build connector")?;

    // -------------------------------
    // 3. Call service
    // -------------------------------

    let mut request = ServiceRequest::new(args.method, args.path);
    for (key, value) in args.params {
        request = request.param(key, value);
    }
    if let Some(body) = args.body {
        request = request.body(body);
    }

    info!("calling {} {}", request.method, connector.target_uri(&request));
    let response = connector.call_service(request).await?;

    println!("{} {}", response.method, response.status);
    if let Some(body) = &response.body {
        println!("{}", body);
    }

    // -------------------------------
    // 4. Metrics
    // -------------------------------

    if args.metrics {
        print!("{}", get_metrics().await.render()?);
    }

    Ok(())
}
