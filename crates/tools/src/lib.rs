//! MCP tools for enterprise voice agent configuration
//!
//! Implements the MCP (Model Context Protocol) tool and resource interface
//! over the shared configuration manager. Transports live elsewhere.

pub mod config_tools;
pub mod mcp;
pub mod registry;
pub mod resources;
pub mod status;

pub use mcp::{
    methods, ContentBlock, ErrorCode, InputSchema, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    PropertySchema, RequestId, Resource, ResourceCapabilities, ResourceContent, ResourceProvider,
    ResourceReadParams, ServerCapabilities, Tool, ToolCallParams, ToolCapabilities, ToolError,
    ToolInput, ToolOutput, ToolSchema, JSONRPC_VERSION, PROTOCOL_VERSION,
};
pub use registry::{create_registry, ToolExecutor, ToolRegistry};
pub use resources::ConfigResources;
pub use status::{server_status, ServerInfo, ServerStatus, SERVER_NAME, SERVER_VERSION};
