//! The aggregate enterprise configuration document

use serde::{Deserialize, Serialize};

use crate::agent::VoiceAgentConfig;
use crate::api::ApiConfig;
use crate::enterprise::EnterpriseInfo;
use crate::knowledge::KnowledgeBaseConfig;
use crate::tool::ToolConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseVoiceAgentConfig {
    pub enterprise: EnterpriseInfo,
    pub apis: Vec<ApiConfig>,
    pub knowledge_base: KnowledgeBaseConfig,
    pub voice_agent: VoiceAgentConfig,
    pub tools: Vec<ToolConfig>,
}

impl EnterpriseVoiceAgentConfig {
    pub fn find_api(&self, name: &str) -> Option<&ApiConfig> {
        self.apis.iter().find(|a| a.name == name)
    }

    /// Endpoints summed over every API
    pub fn endpoint_count(&self) -> usize {
        self.apis.iter().map(|a| a.endpoints.len()).sum()
    }
}
