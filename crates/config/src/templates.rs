//! Industry template catalogue
//!
//! Static, read-only. Keys are matched exactly and case-sensitively.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::ConfigError;

/// Starting point for a new configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryTemplate {
    /// Display label written into `enterprise.industry`
    pub industry: &'static str,
    pub capabilities: &'static [&'static str],
}

static INDUSTRY_TEMPLATES: Lazy<BTreeMap<&'static str, IndustryTemplate>> = Lazy::new(|| {
    let mut templates = BTreeMap::new();
    templates.insert(
        "airline",
        IndustryTemplate {
            industry: "Airline",
            capabilities: &[
                "Flight booking and reservations",
                "Baggage policies and allowances",
                "Check-in and boarding procedures",
                "Ticket changes and cancellations",
                "Loyalty program information",
                "Special assistance services",
                "Flight status and delays",
                "Refunds and compensation",
            ],
        },
    );
    templates.insert(
        "hotel",
        IndustryTemplate {
            industry: "Hotel",
            capabilities: &[
                "Room booking and reservations",
                "Room availability and pricing",
                "Check-in and check-out procedures",
                "Cancellation policies",
                "Loyalty program information",
                "Special requests and amenities",
                "Room service and facilities",
                "Billing and payment information",
            ],
        },
    );
    templates.insert(
        "bank",
        IndustryTemplate {
            industry: "Banking",
            capabilities: &[
                "Account balance inquiries",
                "Transaction history",
                "Transfer and payment services",
                "Loan and credit information",
                "Investment services",
                "Card management",
                "Fraud protection",
                "Branch and ATM locations",
            ],
        },
    );
    templates.insert(
        "retail",
        IndustryTemplate {
            industry: "Retail",
            capabilities: &[
                "Product information and availability",
                "Order status and tracking",
                "Returns and exchanges",
                "Loyalty program benefits",
                "Shipping and delivery",
                "Payment and billing",
                "Customer support",
                "Store locations and hours",
            ],
        },
    );
    templates
});

/// The full catalogue, keyed by industry
pub fn industry_templates() -> &'static BTreeMap<&'static str, IndustryTemplate> {
    &INDUSTRY_TEMPLATES
}

/// Industry keys accepted by [`lookup_template`]
pub fn industry_keys() -> Vec<&'static str> {
    INDUSTRY_TEMPLATES.keys().copied().collect()
}

pub fn lookup_template(key: &str) -> Result<&'static IndustryTemplate, ConfigError> {
    INDUSTRY_TEMPLATES
        .get(key)
        .ok_or_else(|| ConfigError::UnknownTemplate(key.to_string()))
}
