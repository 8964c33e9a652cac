//! Server settings

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;
use voice_mcp_core::VoiceProvider;

use crate::SettingsError;

/// Prefix for layered environment overrides (`VOICE_MCP__SERVER__PORT`)
pub const ENV_PREFIX: &str = "VOICE_MCP";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Enterprise configuration file loaded at boot
    #[serde(default)]
    pub startup_config: Option<String>,

    /// Which provider credentials exist in the process environment
    #[serde(skip)]
    pub credentials: CredentialPresence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Externally reachable URL; derived from the port when unset
    #[serde(default)]
    pub public_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3005
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            public_url: None,
        }
    }
}

impl ServerConfig {
    pub fn public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default)]
    pub default_provider: VoiceProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Presence of provider credentials; the values themselves are never kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialPresence {
    pub vapi_configured: bool,
    pub openai_configured: bool,
}

impl Settings {
    /// Apply the plain environment variables older deployments rely on
    ///
    /// `lookup` is normally `std::env::var`. Values that do not parse are
    /// ignored with a warning.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("DEFAULT_VOICE_PROVIDER") {
            match VoiceProvider::parse(raw.trim()) {
                Some(provider) => self.voice.default_provider = provider,
                None => warn!(value = %raw, "Ignoring DEFAULT_VOICE_PROVIDER, expected openai or vapi"),
            }
        }

        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %raw, "Ignoring PORT, not a valid port number"),
            }
        }

        if let Some(url) = lookup("SERVER_URL").filter(|u| !u.trim().is_empty()) {
            self.server.public_url = Some(url);
        }

        let present = |key: &str| lookup(key).is_some_and(|v| !v.trim().is_empty());
        self.credentials = CredentialPresence {
            vapi_configured: present("VAPI_PUBLIC_KEY"),
            openai_configured: present("OPENAI_API_KEY"),
        };
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.port == 0 {
            return Err(SettingsError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.host.trim().is_empty() {
            return Err(SettingsError::InvalidValue {
                field: "server.host".to_string(),
                message: "Host cannot be empty".to_string(),
            });
        }

        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SettingsError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Unknown level '{}', expected one of {}",
                    self.observability.log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if let Some(path) = &self.startup_config {
            if path.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: "startup_config".to_string(),
                    message: "Path cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority, lowest first: built-in defaults, `config/default.*`,
/// `config/<env>.*`, `file` (when given), `VOICE_MCP__*` variables, then the
/// legacy plain variables.
pub fn load_settings(env: Option<&str>, file: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    if let Some(path) = file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut settings: Settings = config.try_deserialize()?;

    settings.apply_legacy_env(|key| std::env::var(key).ok());
    settings.validate()?;

    Ok(settings)
}
