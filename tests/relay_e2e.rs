mod e2e_utils;

use e2e_utils::{StubRegistry, TestRelayServer};
use serde_json::{json, Value};

#[cfg(test)]
#[tokio::test]
async fn test_relays_resolve_modules_response() {
    let registry = StubRegistry::start(200, r#"{"resolvedModules":[{"moduleName":"http","version":"2.10.1"}]}"#)
        .await
        .expect("Failed to start stub registry");
    let relay = TestRelayServer::start(&registry.base_url())
        .await
        .expect("Failed to start relay");

    let response = reqwest::get(relay.url("/")).await.expect("Relay should answer");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = json_body(response).await;
    assert_eq!(
        body,
        json!({"resolvedModules": [{"moduleName": "http", "version": "2.10.1"}]})
    );
}

#[cfg(test)]
#[tokio::test]
async fn test_outbound_request_shape() {
    let registry = StubRegistry::start(200, "{}")
        .await
        .expect("Failed to start stub registry");
    let relay = TestRelayServer::start(&registry.base_url())
        .await
        .expect("Failed to start relay");

    reqwest::get(relay.url("/")).await.expect("Relay should answer");

    let requests = registry.requests().await;
    assert_eq!(requests.len(), 1, "Exactly one outbound call per inbound request");
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/2.0/registry/packages/resolve-modules");
    assert_eq!(request.headers["content-type"], "application/json; charset=utf-8");
    assert_eq!(request.headers["accept"], "application/json");
    assert_eq!(request.headers["accept-encoding"], "application/json");
    assert_eq!(request.headers["x-central-frontend"], "true");
    assert_eq!(request.headers["x-lib-site"], "true");
    assert!(!request.headers.contains_key("authorization"));

    let payload: Value = serde_json::from_slice(&request.body).expect("Payload should be JSON");
    assert_eq!(
        payload,
        json!({"modules": [{"organization": "ballerina", "moduleName": "http", "version": "2.10.1"}]})
    );
}

#[cfg(test)]
#[tokio::test]
async fn test_registry_error_status_becomes_bad_request() {
    let registry = StubRegistry::start(500, r#"{"message":"internal"}"#)
        .await
        .expect("Failed to start stub registry");
    let relay = TestRelayServer::start(&registry.base_url())
        .await
        .expect("Failed to start relay");

    let response = reqwest::get(relay.url("/")).await.expect("Relay should answer");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = json_body(response).await;
    assert_eq!(body, json!({"error": "Request failed with status code 500"}));
}

#[cfg(test)]
#[tokio::test]
async fn test_unreachable_registry_becomes_bad_request() {
    let relay = TestRelayServer::start("http://127.0.0.1:1")
        .await
        .expect("Failed to start relay");

    let response = reqwest::get(relay.url("/")).await.expect("Relay should answer");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = json_body(response).await;
    assert!(body["error"].is_string(), "Expected an error message, got: {}", body);
}

#[cfg(test)]
#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let registry = StubRegistry::start(200, "{}")
        .await
        .expect("Failed to start stub registry");
    let relay = TestRelayServer::start(&registry.base_url())
        .await
        .expect("Failed to start relay");

    let response = reqwest::get(relay.url("/packages")).await.expect("Relay should answer");

    assert_eq!(response.status().as_u16(), 404);
    assert!(registry.requests().await.is_empty());
}

async fn json_body(response: reqwest::Response) -> Value {
    let bytes = response.bytes().await.expect("Body should be readable");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}
