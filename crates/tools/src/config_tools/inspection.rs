//! Read-only tools

use async_trait::async_trait;
use serde_json::Value;
use voice_mcp_config::{templates, SharedConfigManager};
use voice_mcp_core::EnterpriseVoiceAgentConfig;

use super::{optional_str, schema};
use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};
use crate::status::{server_status, ServerInfo};

/// Get the configuration summary
pub struct GetConfigSummaryTool {
    manager: SharedConfigManager,
}

impl GetConfigSummaryTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for GetConfigSummaryTool {
    fn name(&self) -> &str {
        "get_config_summary"
    }

    fn description(&self) -> &str {
        "Get a summary of the current enterprise configuration"
    }

    fn schema(&self) -> ToolSchema {
        schema(self.name(), self.description(), InputSchema::object())
    }

    async fn execute(&self, _input: Value) -> Result<ToolOutput, ToolError> {
        let summary = self.manager.lock().config_summary()?;
        ToolOutput::titled_json("Configuration Summary:", &summary)
    }
}

type Section = fn(&EnterpriseVoiceAgentConfig) -> Result<Value, serde_json::Error>;

/// Returns one section of the current configuration as JSON
pub struct SectionTool {
    manager: SharedConfigManager,
    name: &'static str,
    description: &'static str,
    title: &'static str,
    section: Section,
}

impl SectionTool {
    fn new(
        manager: SharedConfigManager,
        name: &'static str,
        description: &'static str,
        title: &'static str,
        section: Section,
    ) -> Self {
        Self {
            manager,
            name,
            description,
            title,
            section,
        }
    }

    pub fn enterprise_info(manager: SharedConfigManager) -> Self {
        Self::new(
            manager,
            "get_enterprise_info",
            "Get the enterprise profile",
            "Enterprise Information:",
            |config| serde_json::to_value(&config.enterprise),
        )
    }

    pub fn voice_agent_config(manager: SharedConfigManager) -> Self {
        Self::new(
            manager,
            "get_voice_agent_config",
            "Get the voice agent personality, instructions and capabilities",
            "Voice Agent Configuration:",
            |config| serde_json::to_value(&config.voice_agent),
        )
    }

    pub fn apis_config(manager: SharedConfigManager) -> Self {
        Self::new(
            manager,
            "get_apis_config",
            "Get the configured APIs and their endpoints",
            "APIs Configuration:",
            |config| serde_json::to_value(&config.apis),
        )
    }

    pub fn knowledge_base(manager: SharedConfigManager) -> Self {
        Self::new(
            manager,
            "get_knowledge_base",
            "Get the knowledge base documents and search settings",
            "Knowledge Base:",
            |config| serde_json::to_value(&config.knowledge_base),
        )
    }
}

#[async_trait]
impl Tool for SectionTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn schema(&self) -> ToolSchema {
        schema(self.name, self.description, InputSchema::object())
    }

    async fn execute(&self, _input: Value) -> Result<ToolOutput, ToolError> {
        let manager = self.manager.lock();
        let config = manager.require_config()?;
        let section = (self.section)(config)?;
        ToolOutput::titled_json(self.title, &section)
    }
}

/// Export the configuration as JSON, optionally writing it to a file
pub struct ExportConfigTool {
    manager: SharedConfigManager,
}

impl ExportConfigTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for ExportConfigTool {
    fn name(&self) -> &str {
        "export_config"
    }

    fn description(&self) -> &str {
        "Export the current configuration as JSON"
    }

    fn schema(&self) -> ToolSchema {
        schema(
            self.name(),
            self.description(),
            InputSchema::object().property(
                "filePath",
                PropertySchema::string("Also write the export to this file"),
                false,
            ),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let path = optional_str(&input, "filePath")?;
        let manager = self.manager.lock();
        let exported = manager.export_config()?;

        let title = match path {
            Some(path) => {
                manager.export_config_to_file(path)?;
                format!("Exported configuration to {}:", path)
            }
            None => "Exported Configuration:".to_string(),
        };
        Ok(ToolOutput::text(format!("{}\n\n{}", title, exported)))
    }
}

/// List the industry templates
#[derive(Default)]
pub struct GetIndustryTemplatesTool;

impl GetIndustryTemplatesTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for GetIndustryTemplatesTool {
    fn name(&self) -> &str {
        "get_industry_templates"
    }

    fn description(&self) -> &str {
        "List the industry templates available for new configurations"
    }

    fn schema(&self) -> ToolSchema {
        schema(self.name(), self.description(), InputSchema::object())
    }

    async fn execute(&self, _input: Value) -> Result<ToolOutput, ToolError> {
        ToolOutput::titled_json("Available Industry Templates:", templates::industry_templates())
    }
}

/// Report server and configuration state
pub struct GetServerStatusTool {
    manager: SharedConfigManager,
    server: ServerInfo,
}

impl GetServerStatusTool {
    pub fn new(manager: SharedConfigManager, server: ServerInfo) -> Self {
        Self { manager, server }
    }
}

#[async_trait]
impl Tool for GetServerStatusTool {
    fn name(&self) -> &str {
        "get_server_status"
    }

    fn description(&self) -> &str {
        "Get server status, loaded state and provider environment"
    }

    fn schema(&self) -> ToolSchema {
        schema(self.name(), self.description(), InputSchema::object())
    }

    async fn execute(&self, _input: Value) -> Result<ToolOutput, ToolError> {
        let status = server_status(&self.server, &self.manager.lock());
        ToolOutput::titled_json("Server Status:", &status)
    }
}
