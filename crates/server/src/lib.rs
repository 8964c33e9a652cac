//! Enterprise Voice Agent MCP Server
//!
//! Serves the configuration tools over newline-delimited JSON-RPC on stdio
//! and over HTTP.

pub mod http;
pub mod mcp_server;
pub mod state;
pub mod stdio;

pub use http::create_router;
pub use mcp_server::{handle_message, handle_request};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use voice_mcp_tools::{ErrorCode, ToolError};

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ToolError> for ServerError {
    fn from(err: ToolError) -> Self {
        match err.code {
            ErrorCode::NotFound => ServerError::NotFound(err.message),
            ErrorCode::InternalError => ServerError::Internal(err.message),
            _ => ServerError::InvalidRequest(err.message),
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::from(self), body).into_response()
    }
}
