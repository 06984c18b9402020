//! Employee backend-for-frontend.
//!
//! ```text
//!     Client ──▶ http (router, middleware) ──▶ employees (search, ranking, validation)
//!                                                   │
//!                                                   ▼
//!                                              upstream (reqwest gateway) ──▶ Employee API
//! ```

use std::path::PathBuf;

use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

use employee_bff::config::{self, ConfigError, ServiceConfig};
use employee_bff::observability::{logging, metrics};
use employee_bff::{EmployeeService, HttpEmployeeGateway, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "employee-bff")]
#[command(about = "Backend-for-frontend over the upstream employee API", long_about = None)]
struct Args {
    /// Path to a TOML config file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(long)]
    bind: Option<String>,

    /// Override upstream.base_url
    #[arg(long)]
    upstream_url: Option<String>,
}

fn resolve_config(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(url) = &args.upstream_url {
        config.upstream.base_url = url.clone();
    }
    config::validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "employee-bff starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let gateway = HttpEmployeeGateway::from_config(&config.upstream)?;
    let service = EmployeeService::new(Arc::new(gateway));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let stopped = Shutdown::wait(shutdown.subscribe());
    tokio::spawn(async move {
        employee_bff::lifecycle::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, service);
    server.run(listener, stopped).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
