//! Tools that extend the loaded configuration

use async_trait::async_trait;
use serde_json::Value;
use voice_mcp_config::SharedConfigManager;
use voice_mcp_core::{HttpMethod, ParameterType};

use super::{literals, required_object, required_str, schema};
use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

/// Append an endpoint to an existing API
pub struct AddApiEndpointTool {
    manager: SharedConfigManager,
}

impl AddApiEndpointTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for AddApiEndpointTool {
    fn name(&self) -> &str {
        "add_api_endpoint"
    }

    fn description(&self) -> &str {
        "Add an endpoint to an existing API configuration"
    }

    fn schema(&self) -> ToolSchema {
        let string = PropertySchema::string;
        let parameter = PropertySchema::object("Endpoint parameter")
            .with_property("name", string("Parameter name"), true)
            .with_property(
                "type",
                PropertySchema::enum_type("Parameter type", literals(ParameterType::VALUES)),
                true,
            )
            .with_property("required", PropertySchema::boolean("Whether the parameter is required"), true)
            .with_property("description", string("Parameter description"), true)
            .with_property("example", string("Example value"), false);

        let endpoint = PropertySchema::object("Endpoint definition")
            .with_property("name", string("Endpoint name"), true)
            .with_property("path", string("Path relative to the API base URL"), true)
            .with_property(
                "method",
                PropertySchema::enum_type("HTTP method", literals(HttpMethod::VALUES)),
                true,
            )
            .with_property("description", string("What the endpoint does"), true)
            .with_property(
                "parameters",
                PropertySchema::array("Endpoint parameters", parameter),
                true,
            )
            .with_property("responseFormat", string("Response format"), true)
            .with_property(
                "voiceResponseTemplate",
                string("Template the agent speaks when relaying the response"),
                false,
            );

        schema(
            self.name(),
            self.description(),
            InputSchema::object()
                .property("apiName", string("Name of the API to extend"), true)
                .property("endpoint", endpoint, true),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let api_name = required_str(&input, "apiName")?;
        let endpoint = required_object(&input, "endpoint")?;

        let mut manager = self.manager.lock();
        let api = manager.add_api_endpoint(api_name, endpoint)?;
        let added = api.endpoints.last().map(|e| e.name.as_str()).unwrap_or_default();
        Ok(ToolOutput::text(format!(
            "Added endpoint '{}' to API '{}'",
            added, api_name
        )))
    }
}

/// Add a document to the knowledge base
pub struct AddKnowledgeDocumentTool {
    manager: SharedConfigManager,
}

impl AddKnowledgeDocumentTool {
    pub fn new(manager: SharedConfigManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for AddKnowledgeDocumentTool {
    fn name(&self) -> &str {
        "add_knowledge_document"
    }

    fn description(&self) -> &str {
        "Add a document to the knowledge base"
    }

    fn schema(&self) -> ToolSchema {
        let string = PropertySchema::string;
        let document = PropertySchema::object("Knowledge document")
            .with_property("id", string("Unique document id"), true)
            .with_property("title", string("Document title"), true)
            .with_property("content", string("Document body"), true)
            .with_property("category", string("Document category"), true)
            .with_property("tags", PropertySchema::array("Search tags", string("Tag")), true);

        schema(
            self.name(),
            self.description(),
            InputSchema::object().property("document", document, true),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let document = required_object(&input, "document")?;

        let mut manager = self.manager.lock();
        let added = manager.add_document(document)?;
        Ok(ToolOutput::text(format!(
            "Added document '{}' to knowledge base",
            added.title
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_tools::fixtures::{empty_manager, endpoint, hotel_manager};
    use serde_json::json;

    #[tokio::test]
    async fn test_add_endpoint_requires_known_api() {
        let tool = AddApiEndpointTool::new(hotel_manager());
        let err = tool
            .execute(json!({ "apiName": "rooms", "endpoint": endpoint("availability") }))
            .await
            .unwrap_err();
        assert_eq!(err.message, "API 'rooms' not found");
    }

    #[tokio::test]
    async fn test_add_endpoint_appends() {
        let manager = hotel_manager();
        manager
            .lock()
            .add_api(&json!({
                "name": "rooms",
                "description": "Room inventory",
                "endpoints": [endpoint("list")]
            }))
            .unwrap();

        let output = AddApiEndpointTool::new(manager.clone())
            .execute(json!({ "apiName": "rooms", "endpoint": endpoint("availability") }))
            .await
            .unwrap();
        assert_eq!(output.text_content(), "Added endpoint 'availability' to API 'rooms'");

        let guard = manager.lock();
        let api = guard.config().unwrap().find_api("rooms").unwrap();
        assert_eq!(api.endpoints.len(), 2);
    }

    #[tokio::test]
    async fn test_add_endpoint_validates_shape() {
        let manager = hotel_manager();
        manager
            .lock()
            .add_api(&json!({
                "name": "rooms",
                "description": "Room inventory",
                "endpoints": [endpoint("list")]
            }))
            .unwrap();

        let mut bad = endpoint("broken");
        bad["method"] = json!("PATCH");
        let err = AddApiEndpointTool::new(manager)
            .execute(json!({ "apiName": "rooms", "endpoint": bad }))
            .await
            .unwrap_err();
        assert!(err.message.contains("method"));
    }

    #[tokio::test]
    async fn test_add_document() {
        let manager = hotel_manager();
        let tool = AddKnowledgeDocumentTool::new(manager.clone());
        let document = json!({
            "id": "checkout",
            "title": "Late checkout",
            "content": "Late checkout until 1 PM on request.",
            "category": "policies",
            "tags": ["checkout"]
        });

        let output = tool.execute(json!({ "document": document.clone() })).await.unwrap();
        assert_eq!(output.text_content(), "Added document 'Late checkout' to knowledge base");

        let err = tool.execute(json!({ "document": document })).await.unwrap_err();
        assert!(err.message.contains("checkout"));
        assert_eq!(manager.lock().config().unwrap().knowledge_base.documents.len(), 1);
    }

    #[tokio::test]
    async fn test_add_document_without_config() {
        let tool = AddKnowledgeDocumentTool::new(empty_manager());
        let err = tool
            .execute(json!({ "document": { "id": "x", "title": "t", "content": "c", "category": "k", "tags": [] } }))
            .await
            .unwrap_err();
        assert_eq!(err.message, "No enterprise configuration loaded");
    }
}
