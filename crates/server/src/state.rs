//! Application State
//!
//! Shared state across transports and handlers.

use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use voice_mcp_config::{ConfigError, EnterpriseConfigManager, Settings, SharedConfigManager};
use voice_mcp_tools::{create_registry, ConfigResources, ServerInfo, ToolRegistry};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<RwLock<Settings>>,
    /// The one configuration manager every transport mutates
    pub manager: SharedConfigManager,
    pub tools: Arc<ToolRegistry>,
    pub resources: Arc<ConfigResources>,
    pub server: ServerInfo,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let manager: SharedConfigManager = Arc::new(Mutex::new(
            EnterpriseConfigManager::with_default_provider(settings.voice.default_provider),
        ));
        let server = ServerInfo::from_settings(&settings);

        Self {
            tools: Arc::new(create_registry(manager.clone(), server.clone())),
            resources: Arc::new(ConfigResources::new(manager.clone(), server.clone())),
            settings: Arc::new(RwLock::new(settings)),
            manager,
            server,
        }
    }

    pub fn get_settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Load an enterprise configuration file before serving
    pub fn load_startup_config(&self, path: &Path) -> Result<(), ConfigError> {
        let mut manager = self.manager.lock();
        let config = manager.load_config_from_file(path)?;
        tracing::info!(
            path = %path.display(),
            enterprise = %config.enterprise.name,
            "Startup configuration loaded"
        );
        Ok(())
    }
}
