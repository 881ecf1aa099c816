#![cfg(test)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use central_relay::adapters::{serve, HyperRelayAdapter, ReqwestRegistryClient};
use central_relay::config::{RelayConfig, RuntimeMode};

pub struct TestRelayServer {
    addr: SocketAddr,
    _server_handle: JoinHandle<()>,
}

impl TestRelayServer {
    pub async fn start(base_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = RelayConfig {
            bind: "127.0.0.1:0".into(),
            base_url: base_url.into(),
            connect_timeout_secs: 2,
            ..RelayConfig::default()
        };

        let client = Arc::new(ReqwestRegistryClient::new(&config.client_config()?)?);
        let service = Arc::new(config.relay_service(client));
        let adapter = Arc::new(HyperRelayAdapter::new(service, RuntimeMode::Test));

        let listener = TcpListener::bind(&config.bind).await?;
        let addr = listener.local_addr()?;

        let server_handle = tokio::spawn(async move {
            let _ = serve(listener, adapter, std::future::pending()).await;
        });

        Ok(Self {
            addr,
            _server_handle: server_handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}
