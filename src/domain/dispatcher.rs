use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use super::request::{create_request_options, create_url};
use super::{HttpMethod, QueryParams, RelayError, RemoteResponse, RequestDescriptor, ResponseType, Result, Token};
use crate::ports::RegistryClientPort;

pub const DEFAULT_API_VERSION: &str = "2.0";

/// Issues single registry calls through the injected client.
#[derive(Clone)]
pub struct RegistryDispatcher {
    client: Arc<dyn RegistryClientPort>,
    api_version: String,
}

impl RegistryDispatcher {
    pub fn new(client: Arc<dyn RegistryClientPort>) -> Self {
        Self {
            client,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query_params: Option<&QueryParams>,
        token: &Token,
    ) -> Result<T> {
        self.api_request(HttpMethod::Get, &self.api_version, path, None, token, query_params)
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        data: Value,
        query_params: Option<&QueryParams>,
        token: &Token,
    ) -> Result<T> {
        self.api_request(HttpMethod::Post, &self.api_version, path, Some(data), token, query_params)
            .await
    }

    pub async fn api_request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        api_version: &str,
        path: &str,
        data: Option<Value>,
        token: &Token,
        query_params: Option<&QueryParams>,
    ) -> Result<T> {
        let url = create_url(api_version, path, query_params);
        let options = create_request_options(url, method, data, token, None);
        self.send(options).await
    }

    /// Send a prebuilt descriptor. Failures are logged here and returned as-is.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        let result = match self.client.send(&request).await {
            Ok(response) => decode(response, request.response_type),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            report_failure(&request, e);
        }
        result
    }
}

fn report_failure(request: &RequestDescriptor, err: &RelayError) {
    error!(method = %request.method, url = %request.url, "registry request failed: {}", err);
    if !err.has_response() {
        error!(method = %request.method, url = %request.url, "no response received from registry: {}", err);
    }
}

// An empty body decodes as an empty string. Unparseable JSON is kept as a string.
fn decode<T: DeserializeOwned>(response: RemoteResponse, response_type: Option<ResponseType>) -> Result<T> {
    let value = if response.body.is_empty() {
        Value::String(String::new())
    } else {
        match response_type.unwrap_or(ResponseType::Json) {
            ResponseType::Json => serde_json::from_slice(&response.body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&response.body).into_owned())),
            ResponseType::Text => Value::String(String::from_utf8_lossy(&response.body).into_owned()),
        }
    };
    serde_json::from_value(value).map_err(|e| RelayError::Decode(e.to_string()))
}
