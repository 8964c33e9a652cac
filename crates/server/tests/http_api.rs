//! Router tests driven through `tower::ServiceExt::oneshot`

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use voice_mcp_config::Settings;
use voice_mcp_server::{create_router, AppState};

fn app() -> (AppState, Router) {
    let state = AppState::new(Settings::default());
    let router = create_router(state.clone());
    (state, router)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn template_call() -> Value {
    json!({
        "name": "create_config_from_template",
        "arguments": {
            "industry": "hotel",
            "enterpriseInfo": {
                "name": "Harbor Inn",
                "description": "Boutique waterfront hotel",
                "headquarters": "Portland, ME",
                "website": "https://harborinn.example",
                "phone": "+1-555-0100",
                "email": "stay@harborinn.example"
            }
        }
    })
}

#[tokio::test]
async fn test_health() {
    let (_, router) = app();
    let (status, body) = send(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["server"], "enterprise-voice-agent-mcp-server");
    assert_eq!(body["configLoaded"], false);
    assert_eq!(body["voiceProviderSet"], false);
    assert_eq!(body["environment"]["defaultProvider"], "vapi");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_tools_list() {
    let (_, router) = app();
    let (status, body) = send(&router, Method::POST, "/api/tools/list", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 14);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_tool_call_mutates_shared_state() {
    let (state, router) = app();
    let (status, body) = send(&router, Method::POST, "/api/tools/call", Some(template_call())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("isError").is_none(), "{}", body);
    assert!(body["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Created enterprise configuration for Harbor Inn"));
    assert!(state.manager.lock().config().is_some());

    let (_, health) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(health["configLoaded"], true);
}

#[tokio::test]
async fn test_tool_failure_is_still_200() {
    let (_, router) = app();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/tools/call",
        Some(json!({ "name": "get_enterprise_info" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isError"], true);
    assert_eq!(body["content"][0]["text"], "Error: No enterprise configuration loaded");
}

#[tokio::test]
async fn test_resources() {
    let (_, router) = app();

    let (status, body) = send(&router, Method::GET, "/api/resources/list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resources"].as_array().unwrap().len(), 4);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/resources/read",
        Some(json!({ "uri": "config://enterprise" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No enterprise configuration loaded");

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/resources/read",
        Some(json!({ "uri": "config://server-status" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contents"][0]["mimeType"], "application/json");
}

#[tokio::test]
async fn test_server_config_bundle() {
    let (_, router) = app();

    let (status, _) = send(&router, Method::GET, "/api/server-config", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&router, Method::POST, "/api/tools/call", Some(template_call())).await;

    let (status, body) = send(&router, Method::GET, "/api/server-config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enterpriseConfig"]["enterprise"]["name"], "Harbor Inn");
    assert!(body["voiceProvider"].is_null());
    assert_eq!(body["defaultProvider"], "vapi");
}

#[tokio::test]
async fn test_unknown_route() {
    let (_, router) = app();
    let (status, body) = send(&router, Method::GET, "/api/nothing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_mcp_endpoint() {
    let (_, router) = app();

    let (status, body) = send(
        &router,
        Method::POST,
        "/mcp",
        Some(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 14);

    let (status, body) = send(
        &router,
        Method::POST,
        "/mcp",
        Some(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_startup_config_from_demo_file() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/skyline-air.json");
    let (state, router) = app();
    state.load_startup_config(&path).unwrap();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/tools/call",
        Some(json!({ "name": "get_config_summary" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("isError").is_none(), "{}", body);
    assert!(body["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("Skyline Air"));
}
