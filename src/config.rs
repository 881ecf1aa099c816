use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::ClientConfig;
use crate::domain::dispatcher::DEFAULT_API_VERSION;
use crate::domain::service::RESOLVE_MODULES_PATH;
use crate::domain::{RegistryDispatcher, RelayError, RelayService, ResolveModulesPayload, Result};
use crate::ports::RegistryClientPort;

pub const APP_NAME: &str = "central-relay";
pub const DEFAULT_BASE_URL: &str = "https://api.staging-central.ballerina.io";

/// Selects whether the error handler logs failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub bind: String,
    pub base_url: String,
    pub api_version: String,
    pub resolve_path: String,
    pub connect_timeout_secs: u64,
    pub payload: ResolveModulesPayload,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_version: DEFAULT_API_VERSION.into(),
            resolve_path: RESOLVE_MODULES_PATH.into(),
            connect_timeout_secs: 10,
            payload: ResolveModulesPayload::default(),
        }
    }
}

impl RelayConfig {
    /// Load from `path`, or from confy's per-user location when none is given.
    /// Missing files are created with the defaults.
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, confy::ConfyError> {
        match path {
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, None),
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .parse()
            .map_err(|e| RelayError::InvalidRequest(format!("Invalid base URL {}: {}", self.base_url, e)))?;

        Ok(ClientConfig {
            base_url,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        })
    }

    pub fn relay_service(&self, client: Arc<dyn RegistryClientPort>) -> RelayService {
        let dispatcher = RegistryDispatcher::new(client).with_api_version(self.api_version.clone());
        RelayService::new(dispatcher)
            .with_resolve_path(self.resolve_path.clone())
            .with_payload(self.payload.clone())
    }
}
