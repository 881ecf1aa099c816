use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::domain::{HttpMethod, RelayError, RemoteResponse, RequestDescriptor, Result};
use crate::ports::RegistryClientPort;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Shared registry client. Base URL and default headers are fixed at construction;
/// cookies are kept in a client-wide store, which is what the credentials flag asks for.
pub struct ReqwestRegistryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestRegistryClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut defaults = HeaderMap::new();
        defaults.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        defaults.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(defaults)
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| RelayError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(config.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Plain string join of base and relative URL. The relative part is never
    /// read as a scheme or an absolute path.
    fn resolve(&self, relative: &str) -> Result<Url> {
        let joined = combine_urls(self.base_url.as_str(), relative);
        joined
            .parse()
            .map_err(|e| RelayError::InvalidRequest(format!("Invalid URL {}: {}", joined, e)))
    }
}

#[async_trait]
impl RegistryClientPort for ReqwestRegistryClient {
    async fn send(&self, request: &RequestDescriptor) -> Result<RemoteResponse> {
        let url = self.resolve(&request.url)?;
        log::debug!(
            "{} {} (credentials: {})",
            request.method,
            url,
            request.with_credentials
        );

        let mut builder = self
            .client
            .request(convert_method(request.method), url)
            .headers(build_headers(&request.headers))
            .timeout(request.timeout());

        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| RelayError::InvalidRequest(format!("Unserializable body: {}", e)))?;
            builder = builder.body(bytes);
        }

        let http_response = builder
            .send()
            .await
            .map_err(|e| convert_error(e, request.timeout()))?;

        let status = http_response.status();

        if !status.is_success() {
            let body = http_response.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            return Err(RelayError::Status { status, body });
        }

        let body = http_response
            .bytes()
            .await
            .map_err(|e| convert_error(e, request.timeout()))?
            .to_vec();

        Ok(RemoteResponse::new(status).with_body(body))
    }
}

fn combine_urls(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), relative.trim_start_matches('/'))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn convert_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

fn convert_error(e: reqwest::Error, timeout: Duration) -> RelayError {
    if e.is_timeout() {
        RelayError::Timeout(timeout)
    } else if e.is_builder() {
        RelayError::InvalidRequest(e.to_string())
    } else {
        RelayError::Network(format!("HTTP request failed: {}", e))
    }
}

fn build_headers(headers: &HashMap<String, String>) -> HeaderMap {
    let mut header_map = HeaderMap::new();

    for (key, value) in headers {
        if let (Ok(name), Ok(val)) = (key.parse::<HeaderName>(), value.parse::<HeaderValue>()) {
            header_map.insert(name, val);
        }
    }

    header_map
}
