//! Schema layer
//!
//! One `check_*` function per entity walks an untyped value and records every
//! non-conforming field. The typed entry points at the bottom run a check and
//! convert to the model type only when nothing was violated, so the two
//! documented defaults (OpenAI model and voice) are filled after validation.
//!
//! Unknown keys are ignored and dropped on conversion. Optional fields may be
//! absent but not `null`.

mod checker;

pub use checker::{describe, index, join, Checker};

use serde_json::{Map, Value};

use crate::agent::{ResponseStyle, Tone};
use crate::api::{ApiConfig, ApiEndpoint, AuthType, HttpMethod, ParameterType};
use crate::config::EnterpriseVoiceAgentConfig;
use crate::enterprise::{EnterpriseInfo, SipProvider, SipVoice};
use crate::error::ValidationError;
use crate::knowledge::DocumentChunk;
use crate::provider::{OpenAiConfig, VapiConfig, VoiceProvider, VoiceProviderConfig};
use crate::tool::ToolKind;

fn each_item(c: &mut Checker, items: &[Value], path: &str, mut check: impl FnMut(&mut Checker, &Value, &str)) {
    for (i, item) in items.iter().enumerate() {
        check(c, item, &index(path, i));
    }
}

fn array_of(
    c: &mut Checker,
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    min_len: usize,
    check: impl FnMut(&mut Checker, &Value, &str),
) {
    if let Some(items) = c.array(obj, key, path, min_len) {
        each_item(c, items, &join(path, key), check);
    }
}

pub fn check_contact_info(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "phone", path);
    c.string(obj, "email", path);
    c.optional_string(obj, "whatsapp", path);
    c.optional_string(obj, "chat", path);
}

pub fn check_sip_config(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.boolean(obj, "enabled", path);
    c.non_empty_string(obj, "phoneNumber", path);
    c.literal(obj, "sipProvider", path, SipProvider::VALUES);
    c.non_empty_string(obj, "sipUri", path);
    c.non_empty_string(obj, "webhookUrl", path);
    c.non_empty_string(obj, "projectId", path);
    c.non_empty_string(obj, "instructions", path);
    c.literal(obj, "voice", path, SipVoice::VALUES);
}

pub fn check_enterprise_info(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    for key in ["name", "industry", "description", "headquarters", "website", "supportHours"] {
        c.string(obj, key, path);
    }
    c.string_array(obj, "languages", path, 1);
    match obj.get("contactInfo") {
        Some(contact) => check_contact_info(c, contact, &join(path, "contactInfo")),
        None => c.violate(join(path, "contactInfo"), "object", "missing"),
    }
    if let Some(sip) = obj.get("sipConfig") {
        check_sip_config(c, sip, &join(path, "sipConfig"));
    }
}

pub fn check_api_parameter(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "name", path);
    c.literal(obj, "type", path, ParameterType::VALUES);
    c.boolean(obj, "required", path);
    c.string(obj, "description", path);
    c.optional_string(obj, "example", path);
}

pub fn check_api_endpoint(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "name", path);
    c.string(obj, "path", path);
    c.literal(obj, "method", path, HttpMethod::VALUES);
    c.string(obj, "description", path);
    array_of(c, obj, "parameters", path, 0, check_api_parameter);
    c.string(obj, "responseFormat", path);
    c.optional_string(obj, "voiceResponseTemplate", path);
}

pub fn check_api_authentication(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.literal(obj, "type", path, AuthType::VALUES);
    c.optional_string(obj, "header", path);
    c.optional_string(obj, "parameter", path);
}

pub fn check_api_config(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "name", path);
    c.string(obj, "description", path);
    c.optional_string(obj, "baseUrl", path);
    array_of(c, obj, "endpoints", path, 1, check_api_endpoint);
    if let Some(auth) = obj.get("authentication") {
        check_api_authentication(c, auth, &join(path, "authentication"));
    }
}

pub fn check_document_chunk(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    for key in ["id", "title", "content", "category"] {
        c.string(obj, key, path);
    }
    c.string_array(obj, "tags", path, 0);
}

pub fn check_search_config(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.unsigned(obj, "maxResults", path);
    c.number_in(obj, "similarityThreshold", path, 0.0, 1.0);
}

pub fn check_knowledge_base(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "name", path);
    c.string(obj, "description", path);
    array_of(c, obj, "documents", path, 0, check_document_chunk);
    c.string_array(obj, "categories", path, 0);
    match obj.get("searchConfig") {
        Some(search) => check_search_config(c, search, &join(path, "searchConfig")),
        None => c.violate(join(path, "searchConfig"), "object", "missing"),
    }
}

pub fn check_personality(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.literal(obj, "tone", path, Tone::VALUES);
    c.string(obj, "language", path);
    c.literal(obj, "responseStyle", path, ResponseStyle::VALUES);
}

pub fn check_voice_agent(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "name", path);
    c.string(obj, "instructions", path);
    match obj.get("personality") {
        Some(personality) => check_personality(c, personality, &join(path, "personality")),
        None => c.violate(join(path, "personality"), "object", "missing"),
    }
    c.string_array(obj, "capabilities", path, 0);
    c.string(obj, "fallbackMessage", path);
}

pub fn check_tool_config(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "name", path);
    c.string(obj, "description", path);
    c.literal(obj, "type", path, ToolKind::VALUES);
    c.boolean(obj, "enabled", path);
}

pub fn check_enterprise_voice_agent_config(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    match obj.get("enterprise") {
        Some(v) => check_enterprise_info(c, v, &join(path, "enterprise")),
        None => c.violate(join(path, "enterprise"), "object", "missing"),
    }
    array_of(c, obj, "apis", path, 0, check_api_config);
    match obj.get("knowledgeBase") {
        Some(v) => check_knowledge_base(c, v, &join(path, "knowledgeBase")),
        None => c.violate(join(path, "knowledgeBase"), "object", "missing"),
    }
    match obj.get("voiceAgent") {
        Some(v) => check_voice_agent(c, v, &join(path, "voiceAgent")),
        None => c.violate(join(path, "voiceAgent"), "object", "missing"),
    }
    array_of(c, obj, "tools", path, 0, check_tool_config);
}

pub fn check_openai_config(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "apiKey", path);
    c.optional_string(obj, "model", path);
    c.optional_string(obj, "voice", path);
}

pub fn check_vapi_config(c: &mut Checker, value: &Value, path: &str) {
    let Some(obj) = c.object(value, path) else { return };
    c.string(obj, "publicKey", path);
    c.string(obj, "assistantId", path);
    c.optional_string(obj, "baseUrl", path);
}

fn typed<T: serde::de::DeserializeOwned>(
    value: &Value,
    check: impl FnOnce(&mut Checker, &Value, &str),
) -> Result<T, ValidationError> {
    let mut c = Checker::new();
    check(&mut c, value, "");
    c.conform(value)
}

pub fn enterprise_info(value: &Value) -> Result<EnterpriseInfo, ValidationError> {
    typed(value, check_enterprise_info)
}

pub fn api_config(value: &Value) -> Result<ApiConfig, ValidationError> {
    typed(value, check_api_config)
}

pub fn api_endpoint(value: &Value) -> Result<ApiEndpoint, ValidationError> {
    typed(value, check_api_endpoint)
}

pub fn document_chunk(value: &Value) -> Result<DocumentChunk, ValidationError> {
    typed(value, check_document_chunk)
}

pub fn enterprise_voice_agent_config(value: &Value) -> Result<EnterpriseVoiceAgentConfig, ValidationError> {
    typed(value, check_enterprise_voice_agent_config)
}

/// Validate a provider selection against its credential blob
///
/// `config` must carry the block named by `provider` and must not carry the
/// other provider's block. A `provider` key inside `config`, if present, has
/// to agree with the selector.
pub fn voice_provider_config(provider: VoiceProvider, config: &Value) -> Result<VoiceProviderConfig, ValidationError> {
    let (wanted, other) = match provider {
        VoiceProvider::OpenAi => ("openai", "vapi"),
        VoiceProvider::Vapi => ("vapi", "openai"),
    };

    let mut c = Checker::new();
    let Some(obj) = c.object(config, "config") else {
        return Err(ValidationError::new(c.violations().to_vec()));
    };

    if let Some(declared) = obj.get("provider") {
        if declared.as_str() != Some(provider.as_str()) {
            c.violate("config.provider", format!("'{}'", provider), describe(Some(declared)));
        }
    }

    let block_path = join("config", wanted);
    let block = obj.get(wanted);
    match (provider, block) {
        (_, None) => c.violate(
            block_path.clone(),
            format!("object (required when provider is '{}')", provider),
            "missing",
        ),
        (VoiceProvider::OpenAi, Some(v)) => check_openai_config(&mut c, v, &block_path),
        (VoiceProvider::Vapi, Some(v)) => check_vapi_config(&mut c, v, &block_path),
    }

    if let Some(found) = obj.get(other) {
        c.violate(
            join("config", other),
            format!("absent when provider is '{}'", provider),
            describe(Some(found)),
        );
    }

    c.into_result()?;

    let block = block.cloned().unwrap_or(Value::Null);
    let decoded = match provider {
        VoiceProvider::OpenAi => serde_json::from_value::<OpenAiConfig>(block).map(VoiceProviderConfig::openai),
        VoiceProvider::Vapi => serde_json::from_value::<VapiConfig>(block).map(VoiceProviderConfig::vapi),
    };
    decoded.map_err(|e| ValidationError::single(block_path, "conformant provider block", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_config() -> Value {
        json!({
            "enterprise": {
                "name": "Acme Air",
                "industry": "Airline",
                "description": "Regional carrier",
                "headquarters": "Denver",
                "website": "https://acme.example",
                "supportHours": "24/7",
                "languages": ["English", "Spanish"],
                "contactInfo": { "phone": "+1-555-0100", "email": "help@acme.example" }
            },
            "apis": [{
                "name": "bookings",
                "description": "Booking API",
                "endpoints": [{
                    "name": "lookup",
                    "path": "/bookings/{id}",
                    "method": "GET",
                    "description": "Find a booking",
                    "parameters": [{ "name": "id", "type": "string", "required": true, "description": "PNR" }],
                    "responseFormat": "json"
                }]
            }],
            "knowledgeBase": {
                "name": "KB",
                "description": "Policies",
                "documents": [],
                "categories": [],
                "searchConfig": { "maxResults": 5, "similarityThreshold": 0.7 }
            },
            "voiceAgent": {
                "name": "Acme Voice Assistant",
                "instructions": "Be helpful",
                "personality": { "tone": "friendly", "language": "English", "responseStyle": "concise" },
                "capabilities": ["Flight status and delays"],
                "fallbackMessage": "Sorry"
            },
            "tools": [{ "name": "kb", "description": "search", "type": "knowledge_base", "enabled": true }]
        })
    }

    #[test]
    fn test_valid_config_converts() {
        let config = enterprise_voice_agent_config(&valid_config()).unwrap();
        assert_eq!(config.enterprise.name, "Acme Air");
        assert_eq!(config.apis[0].endpoints[0].method, HttpMethod::Get);
        assert_eq!(config.voice_agent.personality.tone, Tone::Friendly);
        assert_eq!(config.tools[0].kind, ToolKind::KnowledgeBase);
    }

    #[test]
    fn test_every_violation_is_reported() {
        let mut value = valid_config();
        value["enterprise"]["languages"] = json!([]);
        value["apis"][0]["endpoints"][0]["method"] = json!("PATCH");
        value["knowledgeBase"]["searchConfig"]["similarityThreshold"] = json!(1.2);
        value["voiceAgent"].as_object_mut().unwrap().remove("fallbackMessage");

        let err = enterprise_voice_agent_config(&value).unwrap_err();
        assert!(err.has_path("enterprise.languages"));
        assert!(err.has_path("apis[0].endpoints[0].method"));
        assert!(err.has_path("knowledgeBase.searchConfig.similarityThreshold"));
        assert!(err.has_path("voiceAgent.fallbackMessage"));
        assert_eq!(err.violations.len(), 4);
    }

    #[test]
    fn test_check_does_not_mutate_input() {
        let value = valid_config();
        let before = value.clone();
        let _ = enterprise_voice_agent_config(&value);
        assert_eq!(value, before);
    }

    #[test]
    fn test_empty_endpoint_list_rejected() {
        let value = json!({ "name": "x", "description": "y", "endpoints": [] });
        let err = api_config(&value).unwrap_err();
        assert_eq!(err.paths(), vec!["endpoints"]);
    }

    #[test]
    fn test_sip_requires_non_empty_strings() {
        let mut value = valid_config()["enterprise"].clone();
        value["sipConfig"] = json!({
            "enabled": true,
            "phoneNumber": "",
            "sipProvider": "twilio",
            "sipUri": "sip:a@b",
            "webhookUrl": "https://hook",
            "projectId": "p1",
            "instructions": "hi",
            "voice": "robot"
        });
        let err = enterprise_info(&value).unwrap_err();
        assert_eq!(err.paths(), vec!["sipConfig.phoneNumber", "sipConfig.voice"]);
    }

    #[test]
    fn test_null_optional_rejected() {
        let mut value = valid_config()["enterprise"].clone();
        value["contactInfo"]["whatsapp"] = Value::Null;
        let err = enterprise_info(&value).unwrap_err();
        assert!(err.has_path("contactInfo.whatsapp"));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let value = json!({
            "id": "d1", "title": "t", "content": "c", "category": "faq", "tags": [], "extra": 1
        });
        let doc = document_chunk(&value).unwrap();
        let back = serde_json::to_value(&doc).unwrap();
        assert!(back.get("extra").is_none());
    }

    #[test]
    fn test_openai_defaults_filled_after_validation() {
        let config = json!({ "openai": { "apiKey": "sk-test" } });
        let provider = voice_provider_config(VoiceProvider::OpenAi, &config).unwrap();
        let openai = provider.openai.unwrap();
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.voice, "alloy");
        assert!(provider.vapi.is_none());
    }

    #[test]
    fn test_provider_block_mismatch() {
        let config = json!({ "vapi": { "publicKey": "pk", "assistantId": "a1" } });
        let err = voice_provider_config(VoiceProvider::OpenAi, &config).unwrap_err();
        assert!(err.has_path("config.openai"));
        assert!(err.has_path("config.vapi"));
    }

    #[test]
    fn test_declared_provider_must_agree() {
        let config = json!({ "provider": "openai", "vapi": { "publicKey": "pk", "assistantId": "a1" } });
        let err = voice_provider_config(VoiceProvider::Vapi, &config).unwrap_err();
        assert_eq!(err.paths(), vec!["config.provider"]);
    }
}
