use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use central_relay::adapters::{serve, HyperRelayAdapter, ReqwestRegistryClient};
use central_relay::config::{RelayConfig, RuntimeMode};

#[derive(Parser, Debug)]
#[clap(version = env!("CARGO_PKG_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
pub struct Opts {
    /// Configuration file
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,

    /// listen on this network adress
    #[clap(long, short = 'b')]
    bind: Option<String>,

    /// Registry API base URL
    #[clap(long, short = 'u')]
    base_url: Option<String>,

    /// Runtime mode, errors are not logged in test mode
    #[clap(long, env = "RELAY_ENV", value_enum, default_value_t = RuntimeMode::Development)]
    mode: RuntimeMode,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = Opts::parse();

    let mut config = RelayConfig::load(opts.config.as_deref())?;
    if let Some(bind) = opts.bind {
        config.bind = bind;
    }
    if let Some(base_url) = opts.base_url {
        config.base_url = base_url;
    }

    let client = Arc::new(ReqwestRegistryClient::new(&config.client_config()?)?);
    info!("Relaying to {}", client.base_url());

    let service = Arc::new(config.relay_service(client));
    let adapter = Arc::new(HyperRelayAdapter::new(service, opts.mode));

    let listener = TcpListener::bind(&config.bind).await?;
    info!("Listening on: {}", listener.local_addr()?);

    serve(listener, adapter, async {
        tokio::signal::ctrl_c().await.ok();
    })
    .await?;

    Ok(())
}
