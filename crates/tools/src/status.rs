//! Server status payload

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use voice_mcp_config::{CredentialPresence, EnterpriseConfigManager, Settings};
use voice_mcp_core::VoiceProvider;

pub const SERVER_NAME: &str = "enterprise-voice-agent-mcp-server";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Static facts about the running server, captured at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub credentials: CredentialPresence,
    pub server_url: String,
}

impl ServerInfo {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
            credentials: settings.credentials,
            server_url: settings.server.public_url(),
        }
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentStatus {
    pub vapi_configured: bool,
    pub openai_configured: bool,
    pub server_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub server_name: String,
    pub version: String,
    pub default_provider: VoiceProvider,
    pub config_loaded: bool,
    pub voice_provider_set: bool,
    pub environment: EnvironmentStatus,
    /// RFC 3339, UTC
    pub timestamp: String,
}

pub fn server_status(info: &ServerInfo, manager: &EnterpriseConfigManager) -> ServerStatus {
    ServerStatus {
        server_name: info.name.clone(),
        version: info.version.clone(),
        default_provider: manager.default_provider(),
        config_loaded: manager.config().is_some(),
        voice_provider_set: manager.voice_provider().is_some(),
        environment: EnvironmentStatus {
            vapi_configured: info.credentials.vapi_configured,
            openai_configured: info.credentials.openai_configured,
            server_url: info.server_url.clone(),
        },
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reflects_manager() {
        let manager = EnterpriseConfigManager::with_default_provider(VoiceProvider::OpenAi);
        let status = server_status(&ServerInfo::default(), &manager);

        assert_eq!(status.server_name, SERVER_NAME);
        assert_eq!(status.default_provider, VoiceProvider::OpenAi);
        assert!(!status.config_loaded);
        assert!(!status.voice_provider_set);
        assert_eq!(status.environment.server_url, "http://localhost:3005");
        assert!(chrono::DateTime::parse_from_rfc3339(&status.timestamp).is_ok());
    }

    #[test]
    fn test_status_json_field_names() {
        let manager = EnterpriseConfigManager::new();
        let json = serde_json::to_value(server_status(&ServerInfo::default(), &manager)).unwrap();
        assert_eq!(json["defaultProvider"], "vapi");
        assert_eq!(json["environment"]["vapiConfigured"], false);
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
