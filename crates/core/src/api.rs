//! API catalogue

use serde::{Deserialize, Serialize};

literal_enum! {
    pub enum HttpMethod {
        Get => "GET",
        Post => "POST",
        Put => "PUT",
        Delete => "DELETE",
    }
}

literal_enum! {
    pub enum ParameterType {
        String => "string",
        Number => "number",
        Boolean => "boolean",
        Date => "date",
        Array => "array",
    }
}

literal_enum! {
    pub enum AuthType {
        ApiKey => "api_key",
        OAuth => "oauth",
        Basic => "basic",
        Bearer => "bearer",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub required: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub name: String,
    pub path: String,
    pub method: HttpMethod,
    pub description: String,
    pub parameters: Vec<ApiParameter>,
    pub response_format: String,
    /// Template the agent speaks when relaying the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_response_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiAuthentication {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
    /// Header carrying the credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Query parameter carrying the credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// One external API the agent can call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Never empty
    pub endpoints: Vec<ApiEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<ApiAuthentication>,
}
