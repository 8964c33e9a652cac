//! Knowledge base

use serde::{Deserialize, Serialize};
use serde_json::Number;

pub const DEFAULT_MAX_RESULTS: u32 = 5;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// A searchable document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Unique within a knowledge base
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// Search tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    pub max_results: u32,
    /// In `[0, 1]`. Kept as written so `1` exports as `1`, not `1.0`.
    pub similarity_threshold: Number,
}

impl SearchConfig {
    pub fn threshold(&self) -> f64 {
        self.similarity_threshold
            .as_f64()
            .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            similarity_threshold: Number::from_f64(DEFAULT_SIMILARITY_THRESHOLD)
                .unwrap_or_else(|| Number::from(0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseConfig {
    pub name: String,
    pub description: String,
    pub documents: Vec<DocumentChunk>,
    pub categories: Vec<String>,
    pub search_config: SearchConfig,
}

impl KnowledgeBaseConfig {
    /// Empty knowledge base with default search tuning
    pub fn empty(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            documents: Vec::new(),
            categories: Vec::new(),
            search_config: SearchConfig::default(),
        }
    }

    pub fn has_document(&self, id: &str) -> bool {
        self.documents.iter().any(|d| d.id == id)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}
