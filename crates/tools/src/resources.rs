//! Readable configuration views

use serde::Serialize;
use voice_mcp_config::SharedConfigManager;

use crate::mcp::{Resource, ResourceContent, ResourceProvider, ToolError};
use crate::status::{server_status, ServerInfo};

pub const ENTERPRISE_URI: &str = "config://enterprise";
pub const VOICE_PROVIDER_URI: &str = "config://voice-provider";
pub const SUMMARY_URI: &str = "config://summary";
pub const SERVER_STATUS_URI: &str = "config://server-status";

const JSON_MIME: &str = "application/json";

/// The four views over manager state
pub struct ConfigResources {
    manager: SharedConfigManager,
    server: ServerInfo,
}

impl ConfigResources {
    pub fn new(manager: SharedConfigManager, server: ServerInfo) -> Self {
        Self { manager, server }
    }
}

fn json_content(uri: &str, value: &impl Serialize) -> Result<ResourceContent, ToolError> {
    Ok(ResourceContent {
        uri: uri.to_string(),
        mime_type: JSON_MIME.to_string(),
        text: serde_json::to_string_pretty(value)?,
    })
}

fn resource(uri: &str, name: &str, description: &str) -> Resource {
    Resource {
        uri: uri.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        mime_type: JSON_MIME.to_string(),
    }
}

impl ResourceProvider for ConfigResources {
    fn list_resources(&self) -> Vec<Resource> {
        vec![
            resource(
                ENTERPRISE_URI,
                "Enterprise Configuration",
                "Current enterprise voice agent configuration",
            ),
            resource(
                VOICE_PROVIDER_URI,
                "Voice Provider Configuration",
                "Current voice provider selection and credentials",
            ),
            resource(SUMMARY_URI, "Configuration Summary", "Counts and headline fields of the current configuration"),
            resource(SERVER_STATUS_URI, "Server Status", "Server health and configuration state"),
        ]
    }

    fn read_resource(&self, uri: &str) -> Result<ResourceContent, ToolError> {
        let manager = self.manager.lock();
        match uri {
            ENTERPRISE_URI => {
                let config = manager
                    .config()
                    .ok_or_else(|| ToolError::not_found("No enterprise configuration loaded"))?;
                json_content(uri, config)
            }
            VOICE_PROVIDER_URI => {
                let provider = manager
                    .voice_provider()
                    .ok_or_else(|| ToolError::not_found("No voice provider configuration set"))?;
                json_content(uri, provider)
            }
            SUMMARY_URI => json_content(uri, &manager.config_summary()?),
            SERVER_STATUS_URI => json_content(uri, &server_status(&self.server, &manager)),
            _ => Err(ToolError::not_found(format!("Unknown resource: {}", uri))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use voice_mcp_config::EnterpriseConfigManager;
    use voice_mcp_core::VoiceProvider;

    fn resources() -> (SharedConfigManager, ConfigResources) {
        let manager = Arc::new(Mutex::new(EnterpriseConfigManager::new()));
        let resources = ConfigResources::new(manager.clone(), ServerInfo::default());
        (manager, resources)
    }

    #[test]
    fn test_lists_four_views() {
        let (_, resources) = resources();
        let uris: Vec<_> = resources.list_resources().into_iter().map(|r| r.uri).collect();
        assert_eq!(uris, vec![ENTERPRISE_URI, VOICE_PROVIDER_URI, SUMMARY_URI, SERVER_STATUS_URI]);
    }

    #[test]
    fn test_views_require_state() {
        let (_, resources) = resources();
        assert!(resources.read_resource(ENTERPRISE_URI).is_err());
        assert!(resources.read_resource(VOICE_PROVIDER_URI).is_err());
        assert!(resources.read_resource(SUMMARY_URI).is_err());
        assert!(resources.read_resource(SERVER_STATUS_URI).is_ok());
        assert!(resources.read_resource("config://other").is_err());
    }

    #[test]
    fn test_voice_provider_view() {
        let (manager, resources) = resources();
        manager
            .lock()
            .set_voice_provider_config(VoiceProvider::OpenAi, &json!({ "openai": { "apiKey": "sk" } }))
            .unwrap();

        let content = resources.read_resource(VOICE_PROVIDER_URI).unwrap();
        assert_eq!(content.mime_type, "application/json");
        let value: Value = serde_json::from_str(&content.text).unwrap();
        assert_eq!(value["provider"], "openai");
        assert_eq!(value["openai"]["model"], "gpt-4o");
    }
}
