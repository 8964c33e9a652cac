//! Voice provider selection and credentials
//!
//! Only credentials and shape are held here; no provider is ever called.

use serde::{Deserialize, Serialize};

use crate::config::EnterpriseVoiceAgentConfig;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_VOICE: &str = "alloy";

literal_enum! {
    /// Voice back end
    pub enum VoiceProvider {
        OpenAi => "openai",
        Vapi => "vapi",
    }
}

impl Default for VoiceProvider {
    fn default() -> Self {
        Self::Vapi
    }
}

impl std::str::FromStr for VoiceProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "unknown voice provider '{}', expected one of {}",
                s,
                Self::VALUES.join(", ")
            )
        })
    }
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_openai_voice() -> String {
    DEFAULT_OPENAI_VOICE.to_string()
}

/// OpenAI realtime credentials
///
/// `model` and `voice` fall back to their defaults when absent. The defaults
/// are filled during typed conversion, after the shape has been validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_voice")]
    pub voice: String,
}

/// VAPI credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VapiConfig {
    pub public_key: String,
    pub assistant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Selected provider plus at most one credential block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProviderConfig {
    pub provider: VoiceProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vapi: Option<VapiConfig>,
}

impl VoiceProviderConfig {
    pub fn openai(config: OpenAiConfig) -> Self {
        Self {
            provider: VoiceProvider::OpenAi,
            openai: Some(config),
            vapi: None,
        }
    }

    pub fn vapi(config: VapiConfig) -> Self {
        Self {
            provider: VoiceProvider::Vapi,
            openai: None,
            vapi: Some(config),
        }
    }
}

/// Everything an external consumer needs to stand up a voice agent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerConfig {
    pub enterprise_config: EnterpriseVoiceAgentConfig,
    /// Passed through as `null` when no provider has been set
    pub voice_provider: Option<VoiceProviderConfig>,
    pub default_provider: VoiceProvider,
}
