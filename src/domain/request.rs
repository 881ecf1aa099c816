//! Builders for the relative URL and the outbound request descriptor.

use std::collections::HashMap;

use super::{HttpMethod, QueryParams, RequestDescriptor, ResponseType, Token};

pub const REQUEST_TIMEOUT_MILLIS: u64 = 30_000;

/// Joins an API version and a path as `<version>/<path>`.
///
/// Nothing is escaped or normalized, and query parameters are not serialized.
pub fn create_url(api_version: &str, path: &str, _query_params: Option<&QueryParams>) -> String {
    format!("{}/{}", api_version, path)
}

pub fn create_request_options(
    url: String,
    method: HttpMethod,
    body: Option<serde_json::Value>,
    token: &Token,
    response_type: Option<ResponseType>,
) -> RequestDescriptor {
    let mut headers = frontend_headers();
    if !token.is_empty() {
        headers.insert("Authorization".to_string(), token.bearer());
    }

    RequestDescriptor {
        method,
        url,
        body,
        headers,
        timeout_millis: REQUEST_TIMEOUT_MILLIS,
        with_credentials: true,
        response_type,
    }
}

fn frontend_headers() -> HashMap<String, String> {
    [
        ("Content-Type", "application/json; charset=utf-8"),
        ("Accept-Encoding", "application/json"),
        ("Accept", "application/json"),
        ("X-Central-Frontend", "true"),
        ("X-Lib-Site", "true"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
