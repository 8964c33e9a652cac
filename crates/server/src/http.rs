//! HTTP Endpoints
//!
//! REST surface over the same dispatcher the stdio transport uses.

use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Json, State},
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use voice_mcp_core::McpServerConfig;
use voice_mcp_tools::{
    server_status, ResourceProvider, ResourceReadParams, ToolCallParams, ToolError, ToolExecutor,
    ToolOutput,
};

use crate::mcp_server::handle_mcp_request;
use crate::state::AppState;
use crate::ServerError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(state.settings.read().server.cors_enabled);

    Router::new()
        // MCP over HTTP
        .route("/mcp", post(handle_mcp_request))

        // Tool endpoints
        .route("/api/tools/list", post(list_tools))
        .route("/api/tools/call", post(call_tool))

        // Resource endpoints
        .route("/api/resources/list", get(list_resources))
        .route("/api/resources/read", post(read_resource))

        .route("/api/server-config", get(server_config))

        // Health check
        .route("/health", get(health_check))

        .fallback(not_found)

        // Middleware
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors_layer)
        .with_state(state)
}

/// Browser clients from any origin, credentials allowed
///
/// With CORS disabled the layer adds no headers at all.
fn build_cors_layer(enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::info!("CORS disabled");
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let status = {
        let manager = state.manager.lock();
        server_status(&state.server, &manager)
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "server": status.server_name,
            "version": status.version,
            "timestamp": status.timestamp,
            "configLoaded": status.config_loaded,
            "voiceProviderSet": status.voice_provider_set,
            "environment": {
                "vapiConfigured": status.environment.vapi_configured,
                "openaiConfigured": status.environment.openai_configured,
                "defaultProvider": status.default_provider,
            },
        })),
    )
}

/// List available tools
async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "tools": state.tools.list_tools() }))
}

/// Call a tool; failures come back as an error result, never an HTTP error
async fn call_tool(
    State(state): State<AppState>,
    Json(request): Json<ToolCallParams>,
) -> Json<ToolOutput> {
    tracing::debug!(tool = %request.name, "HTTP tool call");
    Json(state.tools.call(&request.name, request.arguments).await)
}

async fn list_resources(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "resources": state.resources.list_resources() }))
}

async fn read_resource(
    State(state): State<AppState>,
    Json(request): Json<ResourceReadParams>,
) -> Result<Json<Value>, ServerError> {
    let content = state.resources.read_resource(&request.uri)?;
    Ok(Json(json!({ "contents": [content] })))
}

/// Everything a consumer needs to stand up a voice agent
async fn server_config(State(state): State<AppState>) -> Result<Json<McpServerConfig>, ServerError> {
    let config = state
        .manager
        .lock()
        .mcp_server_config()
        .map_err(ToolError::from)?;
    Ok(Json(config))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
