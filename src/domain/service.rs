use serde_json::Value;

use super::{RegistryDispatcher, RelayError, ResolveModulesPayload, Result, Token};

pub const RESOLVE_MODULES_PATH: &str = "registry/packages/resolve-modules";

/// Route logic behind `GET /`.
#[derive(Clone)]
pub struct RelayService {
    dispatcher: RegistryDispatcher,
    resolve_path: String,
    payload: ResolveModulesPayload,
}

impl RelayService {
    pub fn new(dispatcher: RegistryDispatcher) -> Self {
        Self {
            dispatcher,
            resolve_path: RESOLVE_MODULES_PATH.to_string(),
            payload: ResolveModulesPayload::default(),
        }
    }

    pub fn with_payload(mut self, payload: ResolveModulesPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_resolve_path(mut self, path: impl Into<String>) -> Self {
        self.resolve_path = path.into();
        self
    }

    pub async fn resolve_modules(&self) -> Result<Value> {
        let payload = serde_json::to_value(&self.payload).map_err(|e| RelayError::InvalidRequest(e.to_string()))?;
        self.dispatcher
            .post(&self.resolve_path, payload, None, &Token::anonymous())
            .await
    }
}
