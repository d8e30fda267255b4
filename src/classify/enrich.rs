//! Remote enrichment: ask the model for a classification triple and
//! validate what comes back.

use serde::Deserialize;

use crate::config::AssistantSettings;
use crate::llm::{ChatMessage, CompletionRequest};

use super::ClassificationResult;
use super::code::is_valid_code;
use super::preferences::UserPreferences;
use super::rules::TRAVEL_TYPE_RULES;

/// Why a remote reply was rejected.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("enrichment call failed: {0}")]
    Provider(#[from] crate::error::LlmError),

    #[error("enrichment call timed out")]
    Timeout,

    #[error("malformed enrichment payload: {0}")]
    Malformed(String),

    #[error("enrichment code {0} is already issued")]
    CodeTaken(String),
}

/// Build the completion request for one classification.
pub fn enrichment_request(
    preferences: &UserPreferences,
    settings: &AssistantSettings,
) -> CompletionRequest {
    let categories = TRAVEL_TYPE_RULES
        .iter()
        .map(|r| format!("- {} (code prefix {})", r.category, r.prefix))
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!(
        "You classify travelers for the JetSet travel planner.\n\
         Known categories:\n{categories}\n\
         - Standard Traveler (code prefix STD)\n\n\
         Respond with ONLY a JSON object with exactly these keys:\n\
         - \"code\": \"JET-<PREFIX>-<4 digits>\" using the category's prefix\n\
         - \"category\": the traveler category\n\
         - \"summary\": 2 to 4 sentences describing the traveler's profile\n\
         {tone}",
        tone = settings.personality.tone(),
    );

    let prefs_json = serde_json::to_string(preferences).unwrap_or_else(|_| "{}".to_string());
    let user = format!(
        "Traveler preferences: {prefs_json}\nWrite the summary in language code \"{lang}\".",
        lang = settings.language,
    );

    CompletionRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
        .with_temperature(0.7)
        .with_max_tokens(512)
}

#[derive(Deserialize)]
struct RemoteTriple {
    code: String,
    category: String,
    summary: String,
}

/// Parse and validate a model reply.
pub fn parse_enrichment(text: &str) -> Result<ClassificationResult, EnrichmentError> {
    let json = extract_json_object(text)
        .ok_or_else(|| EnrichmentError::Malformed("no JSON object in reply".to_string()))?;

    let triple: RemoteTriple =
        serde_json::from_str(json).map_err(|e| EnrichmentError::Malformed(e.to_string()))?;

    let code = triple.code.trim().to_string();
    if !is_valid_code(&code) {
        return Err(EnrichmentError::Malformed(format!("bad code format: {code}")));
    }
    let category = triple.category.trim().to_string();
    if category.is_empty() {
        return Err(EnrichmentError::Malformed("empty category".to_string()));
    }
    let summary = triple.summary.trim().to_string();
    if summary.is_empty() {
        return Err(EnrichmentError::Malformed("empty summary".to_string()));
    }

    Ok(ClassificationResult {
        code,
        category,
        summary,
    })
}

/// Extract a JSON object from model output that might contain markdown or
/// extra text.
fn extract_json_object(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (end > start).then(|| &trimmed[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, Personality};

    #[test]
    fn parses_plain_json() {
        let result = parse_enrichment(
            r#"{"code":"JET-ADV-1234","category":"Adventure Seeker","summary":"You love the outdoors."}"#,
        )
        .unwrap();
        assert_eq!(result.code, "JET-ADV-1234");
        assert_eq!(result.category, "Adventure Seeker");
    }

    #[test]
    fn parses_fenced_json() {
        let text = "Here you go:\n```json\n{\"code\": \"JET-VIP-4821\", \"category\": \"Luxury Traveler\", \"summary\": \"Only the best.\"}\n```";
        assert_eq!(parse_enrichment(text).unwrap().code, "JET-VIP-4821");
    }

    #[test]
    fn rejects_bad_payloads() {
        for text in [
            "I think you're an adventurer!",
            r#"{"code":"JET-ADV-12","category":"Adventure Seeker","summary":"x"}"#,
            r#"{"code":"JET-ADV-1234","category":"  ","summary":"x"}"#,
            r#"{"code":"JET-ADV-1234","category":"Adventure Seeker"}"#,
            r#"{"code":"JET-ADV-1234","category":"Adventure Seeker","summary":""}"#,
            "} backwards {",
        ] {
            assert!(
                matches!(parse_enrichment(text), Err(EnrichmentError::Malformed(_))),
                "accepted: {text}"
            );
        }
    }

    #[test]
    fn request_carries_preferences_and_settings() {
        let prefs = UserPreferences {
            travel_types: Some(vec!["Eco Travel".to_string()]),
            budget: Some("Moderate".to_string()),
            travel_companions: None,
        };
        let settings = AssistantSettings {
            language: Language::Fr,
            personality: Personality::Enthusiastic,
        };
        let request = enrichment_request(&prefs, &settings);

        assert_eq!(request.messages.len(), 2);
        let system = &request.messages[0].content;
        assert!(system.contains("Eco Traveler (code prefix ECO)"));
        assert!(system.contains("upbeat"));
        let user = &request.messages[1].content;
        assert!(user.contains("\"travelTypes\":[\"Eco Travel\"]"));
        assert!(user.contains("\"fr\""));
    }
}
