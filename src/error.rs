//! Error types for JetSet.
//!
//! Each fallible concern has its own enum. None of them reach HTTP clients
//! directly: enrichment failures fall back to local rules, encoder failures
//! fall back to a placeholder, and store failures become a degraded result.

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Share-artifact encoder errors.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Cannot encode empty content")]
    EmptyContent,

    #[error("Content too large to encode: {length} bytes > {max}")]
    ContentTooLarge { length: usize, max: usize },

    #[error("QR encoding failed: {0}")]
    Encode(String),
}

/// Persistence collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_error_reports_sizes() {
        let err = ShareError::ContentTooLarge {
            length: 900,
            max: 512,
        };
        assert_eq!(err.to_string(), "Content too large to encode: 900 bytes > 512");
    }

    #[test]
    fn llm_error_names_provider() {
        let err = LlmError::RequestFailed {
            provider: "gemini".to_string(),
            reason: "HTTP 503".to_string(),
        };
        assert_eq!(err.to_string(), "Provider gemini request failed: HTTP 503");
    }
}
