//! Enterprise voice agent data model
//!
//! Typed configuration entities plus the schema layer that turns untrusted
//! JSON into them. Nothing in this crate performs I/O.

#[macro_use]
mod literal;

pub mod agent;
pub mod api;
pub mod config;
pub mod enterprise;
pub mod error;
pub mod knowledge;
pub mod provider;
pub mod schema;
pub mod tool;

pub use agent::{Personality, ResponseStyle, Tone, VoiceAgentConfig};
pub use api::{ApiAuthentication, ApiConfig, ApiEndpoint, ApiParameter, AuthType, HttpMethod, ParameterType};
pub use config::EnterpriseVoiceAgentConfig;
pub use enterprise::{ContactInfo, EnterpriseInfo, SipConfig, SipProvider, SipVoice};
pub use error::{FieldViolation, ValidationError};
pub use knowledge::{
    DocumentChunk, KnowledgeBaseConfig, SearchConfig, DEFAULT_MAX_RESULTS, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use provider::{
    McpServerConfig, OpenAiConfig, VapiConfig, VoiceProvider, VoiceProviderConfig, DEFAULT_OPENAI_MODEL,
    DEFAULT_OPENAI_VOICE,
};
pub use tool::{ToolConfig, ToolKind};
