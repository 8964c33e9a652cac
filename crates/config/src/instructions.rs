//! Voice agent instruction generation

use voice_mcp_core::{EnterpriseInfo, Tone};

fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "Keep a professional, courteous tone",
        Tone::Friendly => "Keep a warm and friendly tone",
        Tone::Casual => "Keep a relaxed, casual tone",
        Tone::Formal => "Keep a formal, precise tone",
    }
}

/// Build the agent's system instructions
///
/// Pure and deterministic: the same enterprise profile and tone always give
/// the same text. Called on creation and on every enterprise info update.
pub fn generate_instructions(enterprise: &EnterpriseInfo, tone: Tone) -> String {
    format!(
        "You are the voice assistant for {name}, a company in the {industry} industry. \
         Help callers with questions about {name}'s products, services and policies.\n\n\
         {guidance} and keep answers short enough to be spoken aloud.\n\n\
         Customer support is available {hours}. When a caller needs a human agent, \
         let them know these hours.\n\n\
         Only share information you are confident about. If you do not know an answer, \
         say so and offer to connect the caller with the {name} support team.",
        name = enterprise.name,
        industry = enterprise.industry,
        guidance = tone_guidance(tone),
        hours = enterprise.support_hours,
    )
}
