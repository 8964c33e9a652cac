//! Configuration tools
//!
//! Every tool holds a handle to the shared manager and locks it for the
//! duration of one call.

mod inspection;
mod loading;
mod mutation;

pub use inspection::{
    ExportConfigTool, GetConfigSummaryTool, GetIndustryTemplatesTool, GetServerStatusTool,
    SectionTool,
};
pub use loading::{
    CreateConfigFromTemplateTool, LoadConfigFromStringTool, LoadEnterpriseConfigTool,
    SetVoiceProviderTool,
};
pub use mutation::{AddApiEndpointTool, AddKnowledgeDocumentTool};

use serde_json::Value;
use voice_mcp_config::SharedConfigManager;
use voice_mcp_core::EnterpriseVoiceAgentConfig;

use crate::mcp::{InputSchema, ToolError, ToolSchema};
use crate::registry::ToolRegistry;
use crate::status::ServerInfo;

pub fn register_all(registry: &mut ToolRegistry, manager: SharedConfigManager, server: ServerInfo) {
    registry.register(LoadEnterpriseConfigTool::new(manager.clone()));
    registry.register(LoadConfigFromStringTool::new(manager.clone()));
    registry.register(SetVoiceProviderTool::new(manager.clone()));
    registry.register(CreateConfigFromTemplateTool::new(manager.clone()));

    registry.register(GetConfigSummaryTool::new(manager.clone()));
    registry.register(SectionTool::enterprise_info(manager.clone()));
    registry.register(SectionTool::voice_agent_config(manager.clone()));
    registry.register(SectionTool::apis_config(manager.clone()));
    registry.register(SectionTool::knowledge_base(manager.clone()));
    registry.register(ExportConfigTool::new(manager.clone()));
    registry.register(GetIndustryTemplatesTool::new());
    registry.register(GetServerStatusTool::new(manager.clone(), server));

    registry.register(AddApiEndpointTool::new(manager.clone()));
    registry.register(AddKnowledgeDocumentTool::new(manager));
}

fn schema(name: &str, description: &str, input_schema: InputSchema) -> ToolSchema {
    ToolSchema {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Enum literals as schema values
fn literals(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn required_str<'a>(input: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::invalid_params(format!("{} must be a string", key)))
}

fn optional_str<'a>(input: &'a Value, key: &str) -> Result<Option<&'a str>, ToolError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ToolError::invalid_params(format!("{} must be a string", key))),
    }
}

fn required_object<'a>(input: &'a Value, key: &str) -> Result<&'a Value, ToolError> {
    match input.get(key) {
        Some(value @ Value::Object(_)) => Ok(value),
        _ => Err(ToolError::invalid_params(format!("{} must be an object", key))),
    }
}

/// Headline block shared by the load and create results
fn loaded_overview(config: &EnterpriseVoiceAgentConfig) -> String {
    format!(
        "Enterprise: {}\nIndustry: {}\nAPIs: {}\nKnowledge Base Documents: {}",
        config.enterprise.name,
        config.enterprise.industry,
        config.apis.len(),
        config.knowledge_base.documents.len()
    )
}
