//! Agent tool declarations

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

literal_enum! {
    pub enum ToolKind {
        Api => "api",
        KnowledgeBase => "knowledge_base",
        Custom => "custom",
    }
}

/// A capability exposed to the voice agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ToolKind,
    /// Provider-specific blob, carried through untouched
    ///
    /// `None` when the key is absent; an explicit `null` is kept as
    /// `Some(Value::Null)` so it exports back as `null`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    pub enabled: bool,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
