use crate::domain::{RemoteResponse, RequestDescriptor, Result};
use async_trait::async_trait;

/// Port for the shared client talking to the remote registry
#[async_trait]
pub trait RegistryClientPort: Send + Sync {
    /// Issue exactly one request described by `request`.
    ///
    /// Non-2xx answers are errors carrying the remote response.
    async fn send(&self, request: &RequestDescriptor) -> Result<RemoteResponse>;
}
