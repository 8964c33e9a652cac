//! JSON-RPC dispatch
//!
//! Transport-independent handling of MCP requests. Both the stdio loop and
//! the HTTP `/mcp` endpoint funnel through [`handle_message`].

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use voice_mcp_tools::{
    methods, ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
    ResourceCapabilities, ResourceProvider, ResourceReadParams, ServerCapabilities,
    ToolCallParams, ToolCapabilities, ToolExecutor, JSONRPC_VERSION, PROTOCOL_VERSION,
};

use crate::state::AppState;

/// Handle one decoded request
///
/// Returns `None` for notifications.
pub async fn handle_request(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    debug!(method = %request.method, id = ?request.id, "Dispatching request");

    if request.is_notification() {
        if request.method != methods::INITIALIZED {
            debug!(method = %request.method, "Ignoring notification");
        }
        return None;
    }

    let id = request.id.clone();
    let outcome = dispatch(state, &request.method, request.params).await;

    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => JsonRpcResponse::error(id, error),
    })
}

async fn dispatch(state: &AppState, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
    match method {
        methods::INITIALIZE => Ok(initialize_result(state)),
        methods::PING => Ok(json!({})),
        methods::TOOLS_LIST => Ok(json!({ "tools": state.tools.list_tools() })),
        methods::TOOLS_CALL => {
            let call: ToolCallParams = parse_params(params)?;
            let output = state.tools.call(&call.name, call.arguments).await;
            to_result(&output)
        }
        methods::RESOURCES_LIST => Ok(json!({ "resources": state.resources.list_resources() })),
        methods::RESOURCES_READ => {
            let read: ResourceReadParams = parse_params(params)?;
            let content = state.resources.read_resource(&read.uri).map_err(|err| {
                warn!(uri = %read.uri, error = %err.message, "Resource read failed");
                JsonRpcError::from(err)
            })?;
            Ok(json!({ "contents": [content] }))
        }
        other => Err(JsonRpcError::new(
            ErrorCode::MethodNotFound,
            format!("Method not found: {}", other),
        )),
    }
}

fn initialize_result(state: &AppState) -> Value {
    let capabilities = ServerCapabilities {
        tools: Some(ToolCapabilities::default()),
        resources: Some(ResourceCapabilities::default()),
    };

    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": capabilities,
        "serverInfo": {
            "name": state.server.name,
            "version": state.server.version,
        },
    })
}

fn parse_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| JsonRpcError::new(ErrorCode::InvalidParams, format!("Invalid params: {}", e)))
}

fn to_result(value: &impl serde::Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(ErrorCode::InternalError, format!("Serialization failed: {}", e)))
}

/// Handle one raw frame, returning the encoded response if there is one
pub async fn handle_message(state: &AppState, raw: &str) -> Option<String> {
    let response = match serde_json::from_str::<Value>(raw) {
        Ok(value) => {
            let id = value
                .get("id")
                .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());
            match serde_json::from_value::<JsonRpcRequest>(value) {
                Ok(request) if request.jsonrpc == JSONRPC_VERSION => {
                    handle_request(state, request).await
                }
                Ok(request) => Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::new(
                        ErrorCode::InvalidRequest,
                        format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                    ),
                )),
                Err(e) => Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::new(ErrorCode::InvalidRequest, format!("Invalid request: {}", e)),
                )),
            }
        }
        Err(e) => {
            warn!(error = %e, "Unparseable frame");
            Some(JsonRpcResponse::error(
                None,
                JsonRpcError::new(ErrorCode::ParseError, format!("Parse error: {}", e)),
            ))
        }
    }?;

    match serde_json::to_string(&response) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            warn!(error = %e, "Failed to encode response");
            None
        }
    }
}

/// `POST /mcp`: one JSON-RPC request per body
pub async fn handle_mcp_request(State(state): State<AppState>, body: String) -> Response {
    match handle_message(&state, &body).await {
        Some(encoded) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            encoded,
        )
            .into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
