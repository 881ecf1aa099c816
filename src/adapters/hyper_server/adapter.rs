use http_body_util::{combinators::BoxBody, BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use crate::config::RuntimeMode;
use crate::domain::{RelayError, RelayService, Result};

pub type Body = BoxBody<Bytes, hyper::Error>;

pub struct HyperRelayAdapter {
    service: Arc<RelayService>,
    mode: RuntimeMode,
}

impl HyperRelayAdapter {
    pub fn new(service: Arc<RelayService>, mode: RuntimeMode) -> Self {
        Self { service, mode }
    }

    pub async fn handle<B>(&self, req: Request<B>) -> Response<Body>
    where
        B: hyper::body::Body,
        B::Error: std::fmt::Display,
    {
        let span = info_span!("request", id = %Uuid::new_v4(), method = %req.method(), path = %req.uri().path());
        async {
            match self.handle_internal(req).await {
                Ok(body) => json_response(StatusCode::OK, &body),
                Err(e) => self.error_response(&e),
            }
        }
        .instrument(span)
        .await
    }

    async fn handle_internal<B>(&self, req: Request<B>) -> Result<Value>
    where
        B: hyper::body::Body,
        B::Error: std::fmt::Display,
    {
        let (parts, body) = req.into_parts();
        read_json_body(&parts.headers, body).await?;
        self.route(&parts.method, parts.uri.path()).await
    }

    async fn route(&self, method: &Method, path: &str) -> Result<Value> {
        match (method, path) {
            (&Method::GET, "/") => self.service.resolve_modules().await,
            (_, "/") => Err(RelayError::route(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")),
            _ => Err(RelayError::route(StatusCode::NOT_FOUND, "Not found")),
        }
    }

    fn error_response(&self, err: &RelayError) -> Response<Body> {
        if self.mode != RuntimeMode::Test {
            error!("Relay error: {}", err);
        }
        json_response(err.status(), &json!({ "error": err.to_string() }))
    }
}

/// Bodies declared as JSON must parse, whatever the route does with them.
async fn read_json_body<B>(headers: &HeaderMap, body: B) -> Result<Option<Value>>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    let bytes = body
        .collect()
        .await
        .map_err(|e| RelayError::InvalidRequest(format!("Failed to read request body: {}", e)))?
        .to_bytes();

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.trim_start().starts_with("application/json"));
    if !is_json || bytes.is_empty() {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| RelayError::InvalidRequest(format!("Malformed JSON body: {}", e)))
}

fn json_response(status: StatusCode, value: &Value) -> Response<Body> {
    let body = Full::new(Bytes::from(value.to_string()))
        .map_err(|never| match never {})
        .boxed();

    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
    response
}
