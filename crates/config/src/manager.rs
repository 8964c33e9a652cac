//! Enterprise configuration manager
//!
//! Owns the single current enterprise configuration and the voice provider
//! selection. Every mutation either applies completely or leaves the previous
//! state untouched: new state is validated and built on the side, then swapped
//! in.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use voice_mcp_core::schema::{self, Checker};
use voice_mcp_core::{
    ApiConfig, ContactInfo, DocumentChunk, EnterpriseInfo, EnterpriseVoiceAgentConfig,
    KnowledgeBaseConfig, McpServerConfig, Personality, ResponseStyle, SipConfig, Tone,
    ValidationError, VoiceAgentConfig, VoiceProvider, VoiceProviderConfig,
};

use crate::instructions::generate_instructions;
use crate::templates::{self, IndustryTemplate};
use crate::{ConfigError, LoadFailure};

pub const DEFAULT_SUPPORT_HOURS: &str = "Monday-Friday 9:00 AM - 6:00 PM";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "I'm sorry, I don't have that information right now. Let me connect you with someone from our team who can help.";

/// Result of an API upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiUpsert {
    Added,
    Replaced,
}

/// Counts and headline fields of the current configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub enterprise: String,
    pub industry: String,
    pub languages: Vec<String>,
    pub api_count: usize,
    pub endpoint_count: usize,
    pub document_count: usize,
    pub category_count: usize,
    pub tool_count: usize,
    pub enabled_tool_count: usize,
    pub capability_count: usize,
    pub sip_enabled: bool,
}

/// Partial enterprise profile accepted by [`EnterpriseConfigManager::create_config`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateRequest {
    name: String,
    description: String,
    headquarters: String,
    website: String,
    phone: String,
    email: String,
    whatsapp: Option<String>,
    chat: Option<String>,
    support_hours: Option<String>,
    languages: Option<Vec<String>>,
    tone: Option<Tone>,
    language: Option<String>,
    response_style: Option<ResponseStyle>,
    sip_config: Option<SipConfig>,
}

fn check_template_request(partial: &Value) -> Result<TemplateRequest, ValidationError> {
    let mut c = Checker::new();
    if let Some(obj) = c.object(partial, "") {
        for key in ["name", "description", "headquarters", "website", "phone", "email"] {
            c.string(obj, key, "");
        }
        for key in ["whatsapp", "chat", "supportHours", "language"] {
            c.optional_string(obj, key, "");
        }
        c.optional_string_array(obj, "languages", "", 1);
        c.optional_literal(obj, "tone", "", Tone::VALUES);
        c.optional_literal(obj, "responseStyle", "", ResponseStyle::VALUES);
        if let Some(sip) = obj.get("sipConfig") {
            schema::check_sip_config(&mut c, sip, "sipConfig");
        }
    }
    c.conform(partial)
}

fn not_an_object(value: &Value) -> ConfigError {
    ValidationError::single("", "object", schema::describe(Some(value))).into()
}

#[derive(Debug)]
pub struct EnterpriseConfigManager {
    config: Option<EnterpriseVoiceAgentConfig>,
    voice_provider: Option<VoiceProviderConfig>,
    default_provider: VoiceProvider,
}

impl Default for EnterpriseConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EnterpriseConfigManager {
    pub fn new() -> Self {
        Self::with_default_provider(VoiceProvider::default())
    }

    pub fn with_default_provider(default_provider: VoiceProvider) -> Self {
        Self {
            config: None,
            voice_provider: None,
            default_provider,
        }
    }

    pub fn config(&self) -> Option<&EnterpriseVoiceAgentConfig> {
        self.config.as_ref()
    }

    /// Current configuration or [`ConfigError::NoConfig`]
    pub fn require_config(&self) -> Result<&EnterpriseVoiceAgentConfig, ConfigError> {
        self.config.as_ref().ok_or(ConfigError::NoConfig)
    }

    pub fn voice_provider(&self) -> Option<&VoiceProviderConfig> {
        self.voice_provider.as_ref()
    }

    pub fn default_provider(&self) -> VoiceProvider {
        self.default_provider
    }

    /// Read, parse and validate a configuration file, replacing the current one
    pub fn load_config_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<&EnterpriseVoiceAgentConfig, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadFailure::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_config_from_string(&text)
    }

    /// Parse and validate a JSON document, replacing the current configuration
    pub fn load_config_from_string(
        &mut self,
        json: &str,
    ) -> Result<&EnterpriseVoiceAgentConfig, ConfigError> {
        let value: Value = serde_json::from_str(json).map_err(LoadFailure::Parse)?;
        let config =
            schema::enterprise_voice_agent_config(&value).map_err(LoadFailure::Validation)?;

        info!(
            enterprise = %config.enterprise.name,
            apis = config.apis.len(),
            documents = config.knowledge_base.documents.len(),
            tools = config.tools.len(),
            "Loaded enterprise configuration"
        );
        Ok(self.config.insert(config))
    }

    /// Build a fresh configuration from an industry template
    ///
    /// `partial` needs `industry` plus the required profile fields; everything
    /// else falls back to defaults. Replaces any current configuration.
    pub fn create_config(
        &mut self,
        partial: &Value,
    ) -> Result<&EnterpriseVoiceAgentConfig, ConfigError> {
        let obj = partial.as_object().ok_or_else(|| not_an_object(partial))?;
        let industry = match obj.get("industry") {
            Some(Value::String(industry)) => industry.as_str(),
            other => {
                return Err(
                    ValidationError::single("industry", "string", schema::describe(other)).into(),
                )
            }
        };
        let template = templates::lookup_template(industry)?;
        let request = check_template_request(partial)?;

        let config = build_from_template(template, request);
        info!(
            enterprise = %config.enterprise.name,
            industry = %config.enterprise.industry,
            capabilities = config.voice_agent.capabilities.len(),
            "Created enterprise configuration from template"
        );
        Ok(self.config.insert(config))
    }

    /// Replace the voice provider selection wholesale
    ///
    /// The block named by `provider` must be present in `config` and conform;
    /// on failure the stored selection is unchanged.
    pub fn set_voice_provider_config(
        &mut self,
        provider: VoiceProvider,
        config: &Value,
    ) -> Result<&VoiceProviderConfig, ConfigError> {
        let validated = schema::voice_provider_config(provider, config)?;
        info!(provider = %provider, "Voice provider configured");
        Ok(self.voice_provider.insert(validated))
    }

    pub fn set_default_provider(&mut self, provider: VoiceProvider) {
        self.default_provider = provider;
    }

    /// Shallow-merge `partial` into the enterprise block and regenerate instructions
    pub fn update_enterprise_info(&mut self, partial: &Value) -> Result<&EnterpriseInfo, ConfigError> {
        let current = self.config.as_mut().ok_or(ConfigError::NoConfig)?;
        let updates = partial.as_object().ok_or_else(|| not_an_object(partial))?;

        let mut merged = serde_json::to_value(&current.enterprise)?;
        if let Value::Object(fields) = &mut merged {
            for (key, value) in updates {
                fields.insert(key.clone(), value.clone());
            }
        }
        let enterprise = schema::enterprise_info(&merged)?;

        current.voice_agent.instructions =
            generate_instructions(&enterprise, current.voice_agent.personality.tone);
        current.enterprise = enterprise;
        info!(enterprise = %current.enterprise.name, "Updated enterprise info");
        Ok(&current.enterprise)
    }

    /// Validate an API and upsert it by name
    pub fn add_api(&mut self, api: &Value) -> Result<ApiUpsert, ConfigError> {
        let config = self.config.as_mut().ok_or(ConfigError::NoConfig)?;
        let api = schema::api_config(api)?;
        Ok(upsert_api(config, api))
    }

    /// Append an endpoint to an existing API
    ///
    /// Endpoints are not deduplicated by name.
    pub fn add_api_endpoint(&mut self, api_name: &str, endpoint: &Value) -> Result<&ApiConfig, ConfigError> {
        let config = self.config.as_mut().ok_or(ConfigError::NoConfig)?;
        let endpoint = schema::api_endpoint(endpoint)?;
        let mut api = config
            .find_api(api_name)
            .cloned()
            .ok_or_else(|| ConfigError::ApiNotFound(api_name.to_string()))?;
        api.endpoints.push(endpoint);
        upsert_api(config, api);

        config
            .find_api(api_name)
            .ok_or_else(|| ConfigError::ApiNotFound(api_name.to_string()))
    }

    /// Append a knowledge document, registering its category if new
    pub fn add_document(&mut self, document: &Value) -> Result<&DocumentChunk, ConfigError> {
        let config = self.config.as_mut().ok_or(ConfigError::NoConfig)?;
        let document = schema::document_chunk(document)?;

        let kb = &mut config.knowledge_base;
        if kb.has_document(&document.id) {
            return Err(ConfigError::DuplicateDocument(document.id));
        }
        if !kb.has_category(&document.category) {
            kb.categories.push(document.category.clone());
        }
        info!(id = %document.id, category = %document.category, "Added knowledge document");
        let index = kb.documents.len();
        kb.documents.push(document);
        Ok(&kb.documents[index])
    }

    /// Current configuration as indented JSON
    pub fn export_config(&self) -> Result<String, ConfigError> {
        let config = self.require_config()?;
        Ok(serde_json::to_string_pretty(config)?)
    }

    pub fn export_config_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let exported = self.export_config()?;
        std::fs::write(path, exported).map_err(|source| ConfigError::Export {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Exported enterprise configuration");
        Ok(())
    }

    pub fn config_summary(&self) -> Result<ConfigSummary, ConfigError> {
        let config = self.require_config()?;
        Ok(ConfigSummary {
            enterprise: config.enterprise.name.clone(),
            industry: config.enterprise.industry.clone(),
            languages: config.enterprise.languages.clone(),
            api_count: config.apis.len(),
            endpoint_count: config.endpoint_count(),
            document_count: config.knowledge_base.documents.len(),
            category_count: config.knowledge_base.categories.len(),
            tool_count: config.tools.len(),
            enabled_tool_count: config.tools.iter().filter(|t| t.enabled).count(),
            capability_count: config.voice_agent.capabilities.len(),
            sip_enabled: config
                .enterprise
                .sip_config
                .as_ref()
                .is_some_and(|sip| sip.enabled),
        })
    }

    pub fn industry_templates(&self) -> &'static BTreeMap<&'static str, IndustryTemplate> {
        templates::industry_templates()
    }

    /// Bundle for external consumers; the voice provider passes through as-is
    pub fn mcp_server_config(&self) -> Result<McpServerConfig, ConfigError> {
        let config = self.require_config()?;
        Ok(McpServerConfig {
            enterprise_config: config.clone(),
            voice_provider: self.voice_provider.clone(),
            default_provider: self.default_provider,
        })
    }
}

fn upsert_api(config: &mut EnterpriseVoiceAgentConfig, api: ApiConfig) -> ApiUpsert {
    let endpoints = api.endpoints.len();
    let outcome = match config.apis.iter_mut().find(|a| a.name == api.name) {
        Some(existing) => {
            *existing = api;
            ApiUpsert::Replaced
        }
        None => {
            config.apis.push(api);
            ApiUpsert::Added
        }
    };
    info!(?outcome, endpoints, "Upserted API");
    outcome
}

fn build_from_template(
    template: &IndustryTemplate,
    request: TemplateRequest,
) -> EnterpriseVoiceAgentConfig {
    let name = request.name;
    let enterprise = EnterpriseInfo {
        name: name.clone(),
        industry: template.industry.to_string(),
        description: request.description,
        headquarters: request.headquarters,
        website: request.website,
        support_hours: request
            .support_hours
            .unwrap_or_else(|| DEFAULT_SUPPORT_HOURS.to_string()),
        languages: request
            .languages
            .unwrap_or_else(|| vec![DEFAULT_LANGUAGE.to_string()]),
        contact_info: ContactInfo {
            phone: request.phone,
            email: request.email,
            whatsapp: request.whatsapp,
            chat: request.chat,
        },
        sip_config: request.sip_config,
    };

    let tone = request.tone.unwrap_or_default();
    let voice_agent = VoiceAgentConfig {
        name: format!("{} Voice Assistant", name),
        instructions: generate_instructions(&enterprise, tone),
        personality: Personality {
            tone,
            language: request
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            response_style: request.response_style.unwrap_or_default(),
        },
        capabilities: template.capabilities.iter().map(|c| c.to_string()).collect(),
        fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
    };

    EnterpriseVoiceAgentConfig {
        knowledge_base: KnowledgeBaseConfig::empty(
            format!("{} Knowledge Base", name),
            format!("Knowledge base for {}", name),
        ),
        enterprise,
        apis: Vec::new(),
        voice_agent,
        tools: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn retail_request() -> Value {
        json!({
            "industry": "retail",
            "name": "Northwind",
            "description": "Outdoor gear",
            "headquarters": "Seattle",
            "website": "https://northwind.example",
            "phone": "+1-555-0101",
            "email": "help@northwind.example"
        })
    }

    fn api(name: &str, endpoints: &[&str]) -> Value {
        let endpoints: Vec<Value> = endpoints
            .iter()
            .map(|e| {
                json!({
                    "name": e,
                    "path": format!("/{}", e),
                    "method": "GET",
                    "description": e,
                    "parameters": [],
                    "responseFormat": "json"
                })
            })
            .collect();
        json!({ "name": name, "description": "test api", "endpoints": endpoints })
    }

    fn created() -> EnterpriseConfigManager {
        let mut manager = EnterpriseConfigManager::new();
        manager.create_config(&retail_request()).unwrap();
        manager
    }

    #[test]
    fn test_create_fills_defaults() {
        let manager = created();
        let config = manager.config().unwrap();
        assert_eq!(config.enterprise.industry, "Retail");
        assert_eq!(config.enterprise.support_hours, DEFAULT_SUPPORT_HOURS);
        assert_eq!(config.enterprise.languages, vec!["English"]);
        assert_eq!(config.voice_agent.name, "Northwind Voice Assistant");
        assert_eq!(config.voice_agent.personality.tone, Tone::Professional);
        assert_eq!(
            config.voice_agent.personality.response_style,
            ResponseStyle::Conversational
        );
        assert_eq!(config.knowledge_base.name, "Northwind Knowledge Base");
        assert_eq!(config.knowledge_base.search_config.max_results, 5);
        assert_eq!(config.knowledge_base.search_config.threshold(), 0.7);
        assert!(config.apis.is_empty());
        assert!(config.tools.is_empty());
    }

    #[test]
    fn test_create_honours_overrides() {
        let mut request = retail_request();
        request["tone"] = json!("friendly");
        request["languages"] = json!(["English", "French"]);
        request["supportHours"] = json!("24/7");

        let mut manager = EnterpriseConfigManager::new();
        let config = manager.create_config(&request).unwrap();
        assert_eq!(config.voice_agent.personality.tone, Tone::Friendly);
        assert_eq!(config.enterprise.languages.len(), 2);
        assert!(config.voice_agent.instructions.contains("24/7"));
    }

    #[test]
    fn test_create_requires_industry_and_fields() {
        let mut manager = EnterpriseConfigManager::new();

        let mut request = retail_request();
        request.as_object_mut().unwrap().remove("industry");
        assert!(matches!(
            manager.create_config(&request),
            Err(ConfigError::Validation(e)) if e.has_path("industry")
        ));

        let mut request = retail_request();
        request.as_object_mut().unwrap().remove("email");
        assert!(matches!(
            manager.create_config(&request),
            Err(ConfigError::Validation(e)) if e.paths() == vec!["email"]
        ));
        assert!(manager.config().is_none());
    }

    #[test]
    fn test_create_unknown_industry() {
        let mut manager = created();
        let mut request = retail_request();
        request["industry"] = json!("insurance");
        assert!(matches!(
            manager.create_config(&request),
            Err(ConfigError::UnknownTemplate(key)) if key == "insurance"
        ));
        assert_eq!(manager.config().unwrap().enterprise.name, "Northwind");
    }

    #[test]
    fn test_failed_load_keeps_previous_config() {
        let mut manager = created();
        assert!(matches!(
            manager.load_config_from_string("{ not json"),
            Err(ConfigError::Load(LoadFailure::Parse(_)))
        ));
        assert!(matches!(
            manager.load_config_from_string("{}"),
            Err(ConfigError::Load(LoadFailure::Validation(_)))
        ));
        assert_eq!(manager.config().unwrap().enterprise.name, "Northwind");
    }

    #[test]
    fn test_load_missing_file() {
        let mut manager = EnterpriseConfigManager::new();
        let err = manager
            .load_config_from_file("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Load(LoadFailure::Io { .. })));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_operations_need_config() {
        let mut manager = EnterpriseConfigManager::new();
        assert!(matches!(manager.export_config(), Err(ConfigError::NoConfig)));
        assert!(matches!(manager.mcp_server_config(), Err(ConfigError::NoConfig)));
        assert!(matches!(manager.add_api(&api("a", &["x"])), Err(ConfigError::NoConfig)));
        assert!(matches!(
            manager.update_enterprise_info(&json!({ "name": "x" })),
            Err(ConfigError::NoConfig)
        ));
    }

    #[test]
    fn test_add_api_endpoint_appends_without_dedup() {
        let mut manager = created();
        manager.add_api(&api("orders", &["list"])).unwrap();

        let endpoint = api("unused", &["list"])["endpoints"][0].clone();
        let updated = manager.add_api_endpoint("orders", &endpoint).unwrap();
        assert_eq!(updated.endpoints.len(), 2);
        assert_eq!(updated.endpoints[0].name, updated.endpoints[1].name);

        assert!(matches!(
            manager.add_api_endpoint("billing", &endpoint),
            Err(ConfigError::ApiNotFound(name)) if name == "billing"
        ));
    }

    #[test]
    fn test_add_document_registers_category_once() {
        let mut manager = created();
        for id in ["d1", "d2"] {
            manager
                .add_document(&json!({
                    "id": id, "title": "Returns", "content": "30 days",
                    "category": "policies", "tags": ["returns"]
                }))
                .unwrap();
        }
        let kb = &manager.config().unwrap().knowledge_base;
        assert_eq!(kb.documents.len(), 2);
        assert_eq!(kb.categories, vec!["policies"]);
    }

    #[test]
    fn test_update_rejects_invalid_merge() {
        let mut manager = created();
        let before = manager.config().unwrap().clone();
        let result = manager.update_enterprise_info(&json!({ "languages": [] }));
        assert!(matches!(result, Err(ConfigError::Validation(e)) if e.has_path("languages")));
        assert_eq!(manager.config().unwrap(), &before);
    }

    #[test]
    fn test_summary_counts() {
        let mut manager = created();
        manager.add_api(&api("orders", &["list", "get"])).unwrap();
        manager.add_api(&api("stores", &["near"])).unwrap();

        let summary = manager.config_summary().unwrap();
        assert_eq!(summary.enterprise, "Northwind");
        assert_eq!(summary.industry, "Retail");
        assert_eq!(summary.api_count, 2);
        assert_eq!(summary.endpoint_count, 3);
        assert_eq!(summary.document_count, 0);
        assert_eq!(summary.capability_count, 8);
        assert!(!summary.sip_enabled);
    }

    #[test]
    fn test_mcp_server_config_passes_null_provider() {
        let mut manager = created();
        manager.set_default_provider(VoiceProvider::OpenAi);
        let bundle = serde_json::to_value(manager.mcp_server_config().unwrap()).unwrap();
        assert!(bundle["voiceProvider"].is_null());
        assert_eq!(bundle["defaultProvider"], "openai");
        assert_eq!(bundle["enterpriseConfig"]["enterprise"]["name"], "Northwind");
    }
}
