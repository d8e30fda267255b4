//! HTTP server wiring: merges the module routers into one app.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::classify::{AnalyzeRouteState, Classifier, analyze_routes};
use crate::config::AppConfig;
use crate::conversation::{
    ConversationRouteState, SessionRegistry, ShareSettings, conversation_routes,
};
use crate::llm::LlmProvider;
use crate::store::ProfileStore;

/// Everything the routers need, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub classifier: Arc<Classifier>,
    pub store: Arc<dyn ProfileStore>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Wire the classifier and session registry around `store`, enabling
    /// enrichment when `llm` is given.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ProfileStore>,
        llm: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        let mut classifier = Classifier::new(
            Arc::clone(&store),
            config.classifier.clone(),
            config.assistant,
        );
        if let Some(llm) = llm {
            classifier = classifier.with_enrichment(llm);
        }

        let sessions = SessionRegistry::new(config.sessions);

        Self {
            config,
            classifier: Arc::new(classifier),
            store,
            sessions,
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let analyze = analyze_routes(AnalyzeRouteState {
        classifier: Arc::clone(&state.classifier),
        store: Arc::clone(&state.store),
    });

    let conversations = conversation_routes(ConversationRouteState {
        sessions: Arc::clone(&state.sessions),
        classifier: Arc::clone(&state.classifier),
        store: Arc::clone(&state.store),
        settings: state.config.assistant,
        share: ShareSettings {
            size: state.config.share_size,
            profile_base_url: state.config.profile_base_url.clone(),
        },
    });

    Router::new()
        .route("/health", get(health))
        .merge(analyze)
        .merge(conversations)
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_headers(Any)
                    .allow_methods([Method::GET, Method::POST, Method::DELETE])
                    .allow_origin(Any),
            ),
        )
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "jetset"
    }))
}

/// JSON error body with a single `error` field.
pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
