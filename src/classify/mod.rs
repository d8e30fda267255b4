//! Preference classification: turns collected answers into a traveler
//! category, a shareable code, and a narrative summary.
//!
//! Classification has two paths. The remote path asks the configured model
//! for a `{code, category, summary}` triple under a timeout; the local path
//! applies the ordered rule table in `rules`. Callers always get a usable
//! result.

pub mod classifier;
pub mod code;
pub mod enrich;
pub mod preferences;
pub mod routes;
pub mod rules;
pub mod summary;

pub use classifier::{Classification, Classifier};
pub use preferences::UserPreferences;
pub use routes::{AnalyzeRouteState, analyze_routes};
pub use summary::generate_summary;

use serde::{Deserialize, Serialize};

/// Result of classifying one set of preferences. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// `JET-<prefix>-<4 digits>`.
    pub code: String,
    pub category: String,
    pub summary: String,
}

impl ClassificationResult {
    /// Result returned when the service could not complete a request.
    pub fn degraded() -> Self {
        Self {
            code: code::ERROR_CODE.to_string(),
            category: rules::DEFAULT_CATEGORY.to_string(),
            summary: generate_summary(rules::DEFAULT_CATEGORY, "", ""),
        }
    }
}

/// Which path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Remote,
    Local,
    Degraded,
}

impl std::fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Local => write!(f, "local"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}
