//! LLM integration for JetSet.
//!
//! The classifier only needs text in and text out, so the abstraction is a
//! single `LlmProvider::complete` call. Gemini is the one concrete backend.

pub mod gemini;
pub mod provider;

pub use gemini::GeminiProvider;
pub use provider::*;

use std::sync::Arc;

use crate::config::EnrichmentConfig;

/// Create the enrichment provider from configuration.
pub fn create_provider(config: &EnrichmentConfig) -> Arc<dyn LlmProvider> {
    tracing::info!("Using Gemini (model: {})", config.model);
    Arc::new(GeminiProvider::new(config.api_key.clone(), &config.model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_provider_uses_configured_model() {
        let config = EnrichmentConfig {
            api_key: secrecy::SecretString::from("test-key"),
            model: "gemini-2.5-pro".to_string(),
        };
        let provider = create_provider(&config);
        assert_eq!(provider.model_name(), "gemini-2.5-pro");
    }
}
