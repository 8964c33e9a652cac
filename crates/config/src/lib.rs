//! Configuration management for the enterprise voice agent
//!
//! Two unrelated kinds of configuration live here:
//! - The enterprise configuration document, owned by [`EnterpriseConfigManager`]
//!   and mutated through the tool surface at runtime
//! - Server [`Settings`], loaded once at startup from files and environment
//!   variables (`VOICE_MCP_` prefix)

pub mod instructions;
pub mod manager;
pub mod settings;
pub mod templates;

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use voice_mcp_core::ValidationError;

pub use instructions::generate_instructions;
pub use manager::{ApiUpsert, ConfigSummary, EnterpriseConfigManager};
pub use settings::{
    load_settings, CredentialPresence, ObservabilityConfig, ServerConfig, Settings, VoiceConfig,
};
pub use templates::{industry_templates, lookup_template, IndustryTemplate};

/// Manager handle shared between transports
///
/// Every operation reads and writes the whole aggregate, so one lock guards
/// both the enterprise configuration and the voice provider.
pub type SharedConfigManager = Arc<Mutex<EnterpriseConfigManager>>;

/// Why a configuration load was rejected
#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] LoadFailure),

    #[error("No enterprise configuration loaded")]
    NoConfig,

    #[error("No template for industry '{0}'")]
    UnknownTemplate(String),

    #[error("Document '{0}' already exists in the knowledge base")]
    DuplicateDocument(String),

    #[error("API '{0}' not found")]
    ApiNotFound(String),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to export configuration to {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Server settings could not be loaded
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for SettingsError {
    fn from(err: config::ConfigError) -> Self {
        SettingsError::Parse(err.to_string())
    }
}
