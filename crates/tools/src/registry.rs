//! Tool Registry
//!
//! Manages tool registration, discovery, and execution.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use voice_mcp_config::SharedConfigManager;

use crate::config_tools;
use crate::mcp::{Tool, ToolError, ToolOutput, ToolSchema};
use crate::status::ServerInfo;

/// Tool executor trait
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool, folding any failure into an error result
    ///
    /// This is the boundary transports call: it never returns an error.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolOutput {
        match self.execute(name, arguments).await {
            Ok(output) => output,
            Err(err) => {
                warn!(tool = name, code = ?err.code, error = %err.message, "Tool call failed");
                ToolOutput::error(err.message)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(format!("Unknown tool: {}", name)))?;

        tool.validate(&arguments)?;

        debug!(tool = name, "Executing tool");
        tool.execute(arguments).await
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.tools.get(name).map(|t| t.schema())
    }
}

/// Registry with every configuration tool wired to `manager`
pub fn create_registry(manager: SharedConfigManager, server: ServerInfo) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    config_tools::register_all(&mut registry, manager, server);
    registry
}
