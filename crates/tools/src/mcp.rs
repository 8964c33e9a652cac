//! MCP protocol types
//!
//! JSON-RPC 2.0 envelopes plus the tool and resource shapes of the Model
//! Context Protocol. Transport independent.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use voice_mcp_config::ConfigError;

/// Protocol revision reported from `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC method names
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const PING: &str = "ping";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
    pub const RESOURCES_LIST: &str = "resources/list";
    pub const RESOURCES_READ: &str = "resources/read";
}

pub type ToolInput = Value;

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Unknown tool or resource
    NotFound,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::NotFound => -32002,
        }
    }
}

/// Tool or resource failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ToolError {
    pub code: ErrorCode,
    pub message: String,
}

impl ToolError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<ConfigError> for ToolError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::Validation(_)
            | ConfigError::Load(_)
            | ConfigError::UnknownTemplate(_)
            | ConfigError::DuplicateDocument(_) => ErrorCode::InvalidParams,
            ConfigError::NoConfig | ConfigError::ApiNotFound(_) => ErrorCode::NotFound,
            ConfigError::Serialize(_) | ConfigError::Export { .. } => ErrorCode::InternalError,
        };
        Self::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("Serialization failed: {}", err))
    }
}

/// A property in a tool's input schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertySchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
}

impl PropertySchema {
    fn typed(prop_type: &str, description: impl Into<String>) -> Self {
        Self {
            prop_type: prop_type.to_string(),
            description: Some(description.into()),
            enum_values: None,
            default: None,
            properties: None,
            required: None,
            items: None,
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::typed("string", description)
    }

    pub fn enum_type(description: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            enum_values: Some(values),
            ..Self::typed("string", description)
        }
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::typed("boolean", description)
    }

    pub fn object(description: impl Into<String>) -> Self {
        Self {
            properties: Some(BTreeMap::new()),
            ..Self::typed("object", description)
        }
    }

    pub fn array(description: impl Into<String>, items: PropertySchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed("array", description)
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Add a nested property (object schemas only)
    pub fn with_property(mut self, name: &str, schema: PropertySchema, required: bool) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), schema);
        if required {
            self.required
                .get_or_insert_with(Vec::new)
                .push(name.to_string());
        }
        self
    }
}

/// Top-level tool input schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl InputSchema {
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn property(mut self, name: &str, schema: PropertySchema, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// Tool call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Headline followed by pretty-printed JSON
    pub fn titled_json(title: &str, value: &impl Serialize) -> Result<Self, ToolError> {
        let body = serde_json::to_string_pretty(value)?;
        Ok(Self::text(format!("{}\n\n{}", title, body)))
    }

    /// Failure reported as a normal result
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: format!("Error: {}", message),
            }],
            is_error: true,
        }
    }

    /// All text blocks joined with newlines
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An MCP tool
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn schema(&self) -> ToolSchema;

    /// Reject input that lacks a required argument
    fn validate(&self, input: &Value) -> Result<(), ToolError> {
        let schema = self.schema();
        let args = match input {
            Value::Object(args) => args,
            Value::Null if schema.input_schema.required.is_empty() => return Ok(()),
            Value::Null => {
                return Err(ToolError::invalid_params(format!(
                    "{} requires arguments: {}",
                    self.name(),
                    schema.input_schema.required.join(", ")
                )))
            }
            _ => return Err(ToolError::invalid_params("Arguments must be an object")),
        };

        for field in &schema.input_schema.required {
            if args.get(field).map_or(true, Value::is_null) {
                return Err(ToolError::invalid_params(format!(
                    "Missing required argument: {}",
                    field
                )));
            }
        }
        Ok(())
    }

    async fn execute(&self, input: ToolInput) -> Result<ToolOutput, ToolError>;
}

/// A readable view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

pub trait ResourceProvider: Send + Sync {
    fn list_resources(&self) -> Vec<Resource>;

    fn read_resource(&self, uri: &str) -> Result<ResourceContent, ToolError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: &str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            method: method.to_string(),
            params,
        }
    }

    /// Requests without an id expect no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }
}

impl From<ToolError> for JsonRpcError {
    fn from(err: ToolError) -> Self {
        Self::new(err.code, err.message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// `null` when the request id could not be determined
    pub id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReadParams {
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapabilities {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCapabilities {
    pub subscribe: bool,
    pub list_changed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceCapabilities>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo a message"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object()
                    .property("message", PropertySchema::string("Message"), true)
                    .property("loud", PropertySchema::boolean("Shout"), false),
            }
        }

        async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::text(input["message"].as_str().unwrap_or_default()))
        }
    }

    #[test]
    fn test_validate_required_arguments() {
        assert!(Echo.validate(&json!({ "message": "hi" })).is_ok());

        let err = Echo.validate(&json!({ "loud": true })).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.contains("message"));

        assert!(Echo.validate(&json!({ "message": null })).is_err());
        assert!(Echo.validate(&Value::Null).is_err());
        assert!(Echo.validate(&json!([1])).is_err());
    }

    #[test]
    fn test_schema_serialization() {
        let schema = serde_json::to_value(Echo.schema()).unwrap();
        assert_eq!(schema["inputSchema"]["type"], "object");
        assert_eq!(schema["inputSchema"]["required"], json!(["message"]));
        assert_eq!(schema["inputSchema"]["properties"]["loud"]["type"], "boolean");
    }

    #[test]
    fn test_nested_property_schema() {
        let schema = PropertySchema::object("Endpoint")
            .with_property("name", PropertySchema::string("Name"), true)
            .with_property(
                "method",
                PropertySchema::enum_type("Method", vec!["GET".into(), "POST".into()]),
                true,
            )
            .with_property("voiceResponseTemplate", PropertySchema::string("Template"), false);
        let json = serde_json::to_value(schema).unwrap();
        assert_eq!(json["required"], json!(["name", "method"]));
        assert_eq!(json["properties"]["method"]["enum"], json!(["GET", "POST"]));
    }

    #[test]
    fn test_error_output_shape() {
        let output = ToolOutput::error("No enterprise configuration loaded");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            json!({
                "content": [{ "type": "text", "text": "Error: No enterprise configuration loaded" }],
                "isError": true
            })
        );
        assert!(serde_json::to_value(ToolOutput::text("ok")).unwrap().get("isError").is_none());
    }

    #[test]
    fn test_request_ids() {
        let numeric: JsonRpcRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 7, "method": "ping" })).unwrap();
        assert_eq!(numeric.id, Some(RequestId::Number(7)));

        let notification: JsonRpcRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
                .unwrap();
        assert!(notification.is_notification());

        let response = JsonRpcResponse::error(None, JsonRpcError::new(ErrorCode::ParseError, "bad"));
        let json = serde_json::to_value(response).unwrap();
        assert!(json["id"].is_null());
        assert_eq!(json["error"]["code"], -32700);
    }

    #[test]
    fn test_config_error_mapping() {
        assert_eq!(ToolError::from(ConfigError::NoConfig).code, ErrorCode::NotFound);
        let err = ToolError::from(ConfigError::DuplicateDocument("d1".into()));
        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.contains("d1"));
    }
}
