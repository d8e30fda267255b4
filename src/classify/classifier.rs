//! Classifier: coordinates the remote enrichment path and the local rule
//! path.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AssistantSettings, ClassifierConfig};
use crate::llm::LlmProvider;
use crate::store::ProfileStore;

use super::code::issue_code;
use super::enrich::{EnrichmentError, enrichment_request, parse_enrichment};
use super::preferences::UserPreferences;
use super::rules::match_travel_types;
use super::summary::generate_summary;
use super::{ClassificationResult, ClassificationSource};

/// A classification result and the path that produced it.
#[derive(Debug, Clone)]
pub struct Classification {
    pub result: ClassificationResult,
    pub source: ClassificationSource,
}

/// Turns preferences into a `ClassificationResult`.
pub struct Classifier {
    llm: Option<Arc<dyn LlmProvider>>,
    store: Arc<dyn ProfileStore>,
    config: ClassifierConfig,
    settings: AssistantSettings,
}

impl Classifier {
    /// Create a classifier that only uses the local rules.
    pub fn new(
        store: Arc<dyn ProfileStore>,
        config: ClassifierConfig,
        settings: AssistantSettings,
    ) -> Self {
        Self {
            llm: None,
            store,
            config,
            settings,
        }
    }

    /// Enable remote enrichment through `llm`.
    pub fn with_enrichment(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Classify preferences. Never fails: any remote problem falls back to
    /// the local rules.
    pub async fn classify(&self, preferences: &UserPreferences) -> Classification {
        if let Some(llm) = &self.llm {
            match self.classify_remote(llm.as_ref(), preferences).await {
                Ok(result) => {
                    info!(code = %result.code, category = %result.category, "Classified via enrichment");
                    return Classification {
                        result,
                        source: ClassificationSource::Remote,
                    };
                }
                Err(e) => {
                    warn!(
                        model = llm.model_name(),
                        error = %e,
                        "Enrichment failed, falling back to local rules"
                    );
                }
            }
        }

        let result = self.classify_local(preferences).await;
        info!(code = %result.code, category = %result.category, "Classified via local rules");
        Classification {
            result,
            source: ClassificationSource::Local,
        }
    }

    /// Ask the model for a classification. The call and the uniqueness
    /// check of the returned code share the configured timeout.
    pub async fn classify_remote(
        &self,
        llm: &dyn LlmProvider,
        preferences: &UserPreferences,
    ) -> Result<ClassificationResult, EnrichmentError> {
        tokio::time::timeout(self.config.enrichment_timeout, self.enrich(llm, preferences))
            .await
            .map_err(|_| EnrichmentError::Timeout)?
    }

    async fn enrich(
        &self,
        llm: &dyn LlmProvider,
        preferences: &UserPreferences,
    ) -> Result<ClassificationResult, EnrichmentError> {
        let request = enrichment_request(preferences, &self.settings);
        let response = llm.complete(request).await?;
        let result = parse_enrichment(&response.content)?;

        match self.store.code_exists(&result.code).await {
            Ok(false) => Ok(result),
            Ok(true) => Err(EnrichmentError::CodeTaken(result.code)),
            Err(e) => {
                warn!(code = %result.code, error = %e, "Code uniqueness check failed, accepting remote code");
                Ok(result)
            }
        }
    }

    /// Apply the ordered rule table and issue a fresh code.
    pub async fn classify_local(&self, preferences: &UserPreferences) -> ClassificationResult {
        let rule = match_travel_types(preferences.travel_types());
        let code = issue_code(
            self.store.as_ref(),
            rule.prefix,
            self.config.code_attempts,
            self.config.store_timeout,
        )
        .await;

        ClassificationResult {
            code,
            category: rule.category.to_string(),
            summary: generate_summary(rule.category, preferences.budget(), preferences.companions()),
        }
    }
}
