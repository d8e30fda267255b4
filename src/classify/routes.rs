//! REST endpoints for preference analysis and stored profiles.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::server::json_error;
use crate::store::{ProfileStore, TravelerProfile};

use super::classifier::Classifier;
use super::preferences::UserPreferences;
use super::{ClassificationResult, ClassificationSource};

/// Shared state for analysis routes.
#[derive(Clone)]
pub struct AnalyzeRouteState {
    pub classifier: Arc<Classifier>,
    pub store: Arc<dyn ProfileStore>,
}

/// Body of `POST /analyze-preferences`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

impl AnalyzeRequest {
    /// Key the profile is stored under: email, then name, then a fresh id.
    fn user_id(&self) -> String {
        [&self.email, &self.name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

/// POST /analyze-preferences
///
/// Classifies the supplied preferences and persists the resulting profile.
/// Responds 400 when `preferences` is missing and 500 with the degraded
/// result when the profile cannot be stored.
async fn analyze_preferences(
    State(state): State<AnalyzeRouteState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_error(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let Some(preferences) = request.preferences.clone() else {
        return json_error(StatusCode::BAD_REQUEST, "Missing preferences");
    };

    // Run on its own task so a panic inside classification still yields a
    // usable body.
    let classifier = Arc::clone(&state.classifier);
    let prefs = preferences.clone();
    let classification = match tokio::spawn(async move { classifier.classify(&prefs).await }).await
    {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Classification task failed");
            return degraded();
        }
    };

    let profile = TravelerProfile {
        user_id: request.user_id(),
        name: request.name.clone(),
        email: request.email.clone(),
        classification: classification.result.clone(),
        preferences,
        source: classification.source,
        created_at: Utc::now(),
    };

    if let Err(e) = state.store.save_profile(&profile).await {
        error!(user_id = %profile.user_id, error = %e, "Failed to persist traveler profile");
        return degraded();
    }

    info!(
        user_id = %profile.user_id,
        code = %profile.classification.code,
        source = %profile.source,
        "Preferences analyzed"
    );
    (StatusCode::OK, Json(classification.result)).into_response()
}

/// GET /api/profiles/{user_id}
///
/// Returns the stored profile, or 404 if none exists.
async fn get_profile(
    State(state): State<AnalyzeRouteState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.store.get_profile(&user_id).await {
        Ok(Some(profile)) => Json(profile).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "No profile exists for this user"),
        Err(e) => {
            error!(user_id = %user_id, error = %e, "Failed to load traveler profile");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Profile store unavailable")
        }
    }
}

fn degraded() -> Response {
    let result = ClassificationResult::degraded();
    info!(code = %result.code, source = %ClassificationSource::Degraded, "Returning degraded classification");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(result)).into_response()
}

/// Build the analysis routes.
pub fn analyze_routes(state: AnalyzeRouteState) -> Router {
    Router::new()
        .route("/analyze-preferences", post(analyze_preferences))
        .route("/api/profiles/{user_id}", get(get_profile))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>) -> AnalyzeRequest {
        AnalyzeRequest {
            name: name.map(String::from),
            email: email.map(String::from),
            preferences: None,
        }
    }

    #[test]
    fn user_id_prefers_email() {
        assert_eq!(
            request(Some("Ana"), Some("ana@example.com")).user_id(),
            "ana@example.com"
        );
        assert_eq!(request(Some("Ana"), Some("  ")).user_id(), "Ana");
        let generated = request(None, None).user_id();
        assert!(Uuid::parse_str(&generated).is_ok());
    }

    #[test]
    fn degraded_result_is_standard() {
        let result = ClassificationResult::degraded();
        assert_eq!(result.code, "JET-ERR-500");
        assert_eq!(result.category, "Standard Traveler");
        assert!(result.summary.starts_with("As a Standard Traveler"));
    }
}
