//! Voice agent persona

use serde::{Deserialize, Serialize};

literal_enum! {
    pub enum Tone {
        Professional => "professional",
        Friendly => "friendly",
        Casual => "casual",
        Formal => "formal",
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::Professional
    }
}

literal_enum! {
    pub enum ResponseStyle {
        Concise => "concise",
        Detailed => "detailed",
        Conversational => "conversational",
    }
}

impl Default for ResponseStyle {
    fn default() -> Self {
        Self::Conversational
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personality {
    pub tone: Tone,
    pub language: String,
    pub response_style: ResponseStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAgentConfig {
    pub name: String,
    /// System prompt; regenerated whenever enterprise info changes
    pub instructions: String,
    pub personality: Personality,
    pub capabilities: Vec<String>,
    /// Spoken when no answer is found
    pub fallback_message: String,
}
