//! Enterprise profile

use serde::{Deserialize, Serialize};

literal_enum! {
    /// Telephony provider behind the SIP trunk
    pub enum SipProvider {
        Twilio => "twilio",
        Vonage => "vonage",
        Custom => "custom",
    }
}

literal_enum! {
    /// Synthesized voice used on SIP calls
    pub enum SipVoice {
        Alloy => "alloy",
        Echo => "echo",
        Fable => "fable",
        Onyx => "onyx",
        Nova => "nova",
        Shimmer => "shimmer",
    }
}

/// Ways to reach the business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<String>,
}

/// SIP telephony block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipConfig {
    pub enabled: bool,
    pub phone_number: String,
    pub sip_provider: SipProvider,
    pub sip_uri: String,
    pub webhook_url: String,
    pub project_id: String,
    pub instructions: String,
    pub voice: SipVoice,
}

/// Business profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseInfo {
    pub name: String,
    pub industry: String,
    pub description: String,
    pub headquarters: String,
    pub website: String,
    pub support_hours: String,
    /// Supported languages, never empty
    pub languages: Vec<String>,
    pub contact_info: ContactInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sip_config: Option<SipConfig>,
}
