//! Tools that replace configuration state wholesale

use async_trait::async_trait;
use serde_json::{json, Value};
use voice_mcp_config::{templates, SharedConfigManager};
use voice_mcp_core::{ResponseStyle, Tone, VoiceProvider};

use super::{literals, loaded_overview, required_object, required_str, schema};
use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

/// Load an enterprise configuration from a JSON file
pub struct LoadEnterpriseConfigTool {
    manager: SharedConfigManager,
}

impl LoadEnterpriseConfigTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for LoadEnterpriseConfigTool {
    fn name(&self) -> &str {
        "load_enterprise_config"
    }

    fn description(&self) -> &str {
        "Load an enterprise voice agent configuration from a JSON file"
    }

    fn schema(&self) -> ToolSchema {
        schema(
            self.name(),
            self.description(),
            InputSchema::object().property(
                "filePath",
                PropertySchema::string("Path to the enterprise configuration JSON file"),
                true,
            ),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let path = required_str(&input, "filePath")?;
        let mut manager = self.manager.lock();
        let config = manager.load_config_from_file(path)?;
        Ok(ToolOutput::text(format!(
            "Loaded enterprise configuration from {}\n\n{}",
            path,
            loaded_overview(config)
        )))
    }
}

/// Load an enterprise configuration from inline JSON
pub struct LoadConfigFromStringTool {
    manager: SharedConfigManager,
}

impl LoadConfigFromStringTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for LoadConfigFromStringTool {
    fn name(&self) -> &str {
        "load_config_from_string"
    }

    fn description(&self) -> &str {
        "Load an enterprise voice agent configuration from a JSON string"
    }

    fn schema(&self) -> ToolSchema {
        schema(
            self.name(),
            self.description(),
            InputSchema::object().property(
                "jsonConfig",
                PropertySchema::string("Enterprise configuration as a JSON string"),
                true,
            ),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let json = required_str(&input, "jsonConfig")?;
        let mut manager = self.manager.lock();
        let config = manager.load_config_from_string(json)?;
        Ok(ToolOutput::text(format!(
            "Loaded enterprise configuration from JSON string\n\n{}",
            loaded_overview(config)
        )))
    }
}

/// Select the voice provider and store its credentials
pub struct SetVoiceProviderTool {
    manager: SharedConfigManager,
}

impl SetVoiceProviderTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

/// Keep the first four characters of a credential
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

/// Provider config as JSON with credentials masked
fn masked(provider: &voice_mcp_core::VoiceProviderConfig) -> Result<Value, ToolError> {
    let mut value = serde_json::to_value(provider)?;
    for (block, key) in [("openai", "apiKey"), ("vapi", "publicKey")] {
        if let Some(Value::String(secret)) = value.get_mut(block).and_then(|b| b.get_mut(key)) {
            *secret = mask(secret);
        }
    }
    Ok(value)
}

#[async_trait]
impl Tool for SetVoiceProviderTool {
    fn name(&self) -> &str {
        "set_voice_provider"
    }

    fn description(&self) -> &str {
        "Set the voice provider (OpenAI or VAPI) and its credentials"
    }

    fn schema(&self) -> ToolSchema {
        let openai = PropertySchema::object("OpenAI realtime credentials")
            .with_property("apiKey", PropertySchema::string("OpenAI API key"), true)
            .with_property(
                "model",
                PropertySchema::string("Realtime model").with_default(json!("gpt-4o")),
                false,
            )
            .with_property(
                "voice",
                PropertySchema::string("Synthesized voice").with_default(json!("alloy")),
                false,
            );
        let vapi = PropertySchema::object("VAPI credentials")
            .with_property("publicKey", PropertySchema::string("VAPI public key"), true)
            .with_property("assistantId", PropertySchema::string("VAPI assistant id"), true)
            .with_property("baseUrl", PropertySchema::string("VAPI API base URL"), false);

        schema(
            self.name(),
            self.description(),
            InputSchema::object()
                .property(
                    "provider",
                    PropertySchema::enum_type("Voice provider", literals(VoiceProvider::VALUES)),
                    true,
                )
                .property(
                    "config",
                    PropertySchema::object("Credentials block for the selected provider")
                        .with_property("openai", openai, false)
                        .with_property("vapi", vapi, false),
                    true,
                ),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let raw = required_str(&input, "provider")?;
        let provider = raw.parse::<VoiceProvider>().map_err(ToolError::invalid_params)?;
        let config = required_object(&input, "config")?;

        let mut manager = self.manager.lock();
        let stored = manager.set_voice_provider_config(provider, config)?;
        ToolOutput::titled_json(
            &format!("Voice provider set to {}\n\nConfiguration:", provider),
            &masked(stored)?,
        )
    }
}

/// Create a configuration from an industry template
pub struct CreateConfigFromTemplateTool {
    manager: SharedConfigManager,
}

impl CreateConfigFromTemplateTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for CreateConfigFromTemplateTool {
    fn name(&self) -> &str {
        "create_config_from_template"
    }

    fn description(&self) -> &str {
        "Create a new enterprise configuration from an industry template"
    }

    fn schema(&self) -> ToolSchema {
        let string = PropertySchema::string;
        let enterprise_info = PropertySchema::object("Enterprise profile")
            .with_property("name", string("Business name"), true)
            .with_property("description", string("What the business does"), true)
            .with_property("headquarters", string("Headquarters location"), true)
            .with_property("website", string("Website URL"), true)
            .with_property("phone", string("Support phone number"), true)
            .with_property("email", string("Support email address"), true)
            .with_property("whatsapp", string("WhatsApp contact"), false)
            .with_property("chat", string("Chat contact"), false)
            .with_property("supportHours", string("Support hours"), false)
            .with_property(
                "languages",
                PropertySchema::array("Supported languages", string("Language")),
                false,
            )
            .with_property(
                "tone",
                PropertySchema::enum_type("Agent tone", literals(Tone::VALUES)),
                false,
            )
            .with_property("language", string("Agent language"), false)
            .with_property(
                "responseStyle",
                PropertySchema::enum_type("Agent response style", literals(ResponseStyle::VALUES)),
                false,
            );

        schema(
            self.name(),
            self.description(),
            InputSchema::object()
                .property(
                    "industry",
                    PropertySchema::enum_type("Industry template", literals(&templates::industry_keys())),
                    true,
                )
                .property("enterpriseInfo", enterprise_info, true),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let industry = required_str(&input, "industry")?;
        let mut partial = required_object(&input, "enterpriseInfo")?.clone();
        partial["industry"] = Value::String(industry.to_string());

        let mut manager = self.manager.lock();
        let config = manager.create_config(&partial)?;
        Ok(ToolOutput::text(format!(
            "Created enterprise configuration for {} using {} template\n\nEnterprise: {}\nIndustry: {}\nCapabilities: {}",
            config.enterprise.name,
            industry,
            config.enterprise.name,
            config.enterprise.industry,
            config.voice_agent.capabilities.len()
        )))
    }
}
