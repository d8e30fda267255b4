//! REST endpoints that drive a planning conversation.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classify::{Classifier, UserPreferences};
use crate::config::AssistantSettings;
use crate::server::json_error;
use crate::share;
use crate::store::{ProfileStore, TravelerProfile};

use super::machine::{StepOutcome, submit_answer};
use super::prompts::{PromptKey, prompt_text};
use super::record::ConversationRecord;
use super::sessions::{IssuedProfile, Session, SessionIdentity, SessionRegistry};
use super::state::ConversationStep;

/// How share artifacts are produced for issued profiles.
#[derive(Debug, Clone)]
pub struct ShareSettings {
    pub size: u32,
    pub profile_base_url: Option<String>,
}

/// Shared state for conversation routes.
#[derive(Clone)]
pub struct ConversationRouteState {
    pub sessions: Arc<SessionRegistry>,
    pub classifier: Arc<Classifier>,
    pub store: Arc<dyn ProfileStore>,
    pub settings: AssistantSettings,
    pub share: ShareSettings,
}

#[derive(Debug, Default, Deserialize)]
struct StartRequest {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct StartResponse {
    session_id: Uuid,
    step: ConversationStep,
    prompt_key: PromptKey,
    prompt: &'static str,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    step: ConversationStep,
    prompt_key: PromptKey,
    prompt: &'static str,
    complete: bool,
    retry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<IssuedProfile>,
}

#[derive(Debug, Serialize)]
struct SessionView {
    session_id: Uuid,
    identity: SessionIdentity,
    record: ConversationRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<IssuedProfile>,
}

/// POST /api/conversations
///
/// Starts a conversation. The body is optional.
async fn start_conversation(
    State(state): State<ConversationRouteState>,
    body: Bytes,
) -> Response {
    let request: StartRequest = if body.iter().all(u8::is_ascii_whitespace) {
        StartRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(r) => r,
            Err(e) => return json_error(StatusCode::BAD_REQUEST, &format!("Invalid body: {e}")),
        }
    };

    let identity = SessionIdentity {
        user_id: request.user_id,
        name: request.name,
        email: request.email,
    };
    let (session_id, _) = state.sessions.start(identity).await;

    let step = ConversationStep::default();
    let prompt_key = step.prompt_key();
    (
        StatusCode::CREATED,
        Json(StartResponse {
            session_id,
            step,
            prompt_key,
            prompt: prompt_text(prompt_key, state.settings.language),
        }),
    )
        .into_response()
}

/// POST /api/conversations/{id}/messages
///
/// Submits the answer for the current step. The first time the conversation
/// completes, the profile is classified, rendered, and persisted; later
/// calls return the same profile.
async fn post_message(
    State(state): State<ConversationRouteState>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let Some(handle) = state.sessions.get(session_id).await else {
        return json_error(StatusCode::NOT_FOUND, "Unknown conversation");
    };
    let mut session = handle.lock().await;
    session.touch();

    let outcome = submit_answer(&mut session.record, &request.text);
    if let StepOutcome::Next(_) = outcome {
        info!(session_id = %session_id, step = %session.record.step, "Answer accepted");
    }

    if outcome.is_complete() && session.issued.is_none() {
        let issued = issue_profile(&state, &session).await;
        session.complete(issued);
    }

    let prompt_key = outcome.prompt_key();
    Json(MessageResponse {
        step: session.record.step,
        prompt_key,
        prompt: prompt_text(prompt_key, state.settings.language),
        complete: outcome.is_complete(),
        retry: matches!(outcome, StepOutcome::Retry { .. }),
        profile: session.issued.clone(),
    })
    .into_response()
}

/// GET /api/conversations/{id}
async fn get_conversation(
    State(state): State<ConversationRouteState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let Some(handle) = state.sessions.get(session_id).await else {
        return json_error(StatusCode::NOT_FOUND, "Unknown conversation");
    };
    let session = handle.lock().await;
    Json(SessionView {
        session_id,
        identity: session.identity.clone(),
        record: session.record.clone(),
        profile: session.issued.clone(),
    })
    .into_response()
}

/// DELETE /api/conversations/{id}
async fn end_conversation(
    State(state): State<ConversationRouteState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    if state.sessions.end(session_id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        json_error(StatusCode::NOT_FOUND, "Unknown conversation")
    }
}

/// Classify a finished conversation, render its share artifact, and hand
/// both to the store.
async fn issue_profile(state: &ConversationRouteState, session: &Session) -> IssuedProfile {
    let preferences = UserPreferences::from_record(&session.record);
    let classification = state.classifier.classify(&preferences).await;
    let code = &classification.result.code;

    let content = share::share_content(code, state.share.profile_base_url.as_deref());
    let share_artifact = match share::render(&content, state.share.size) {
        Ok(artifact) => artifact.to_data_uri(),
        Err(e) => {
            warn!(session_id = %session.id, error = %e, "Share artifact unavailable");
            String::new()
        }
    };

    let user_id = session.user_key();
    let profile = TravelerProfile {
        user_id: user_id.clone(),
        name: session.identity.name.clone(),
        email: session.identity.email.clone(),
        classification: classification.result.clone(),
        preferences,
        source: classification.source,
        created_at: Utc::now(),
    };
    if let Err(e) = state.store.save_profile(&profile).await {
        warn!(user_id = %user_id, error = %e, "Failed to persist traveler profile");
    }
    if let Err(e) = state.store.save_conversation(&user_id, &session.record).await {
        warn!(user_id = %user_id, error = %e, "Failed to persist conversation");
    }

    info!(
        session_id = %session.id,
        code = %code,
        source = %classification.source,
        "Conversation complete, profile issued"
    );

    IssuedProfile {
        classification: classification.result,
        share_artifact,
    }
}

/// Build the conversation routes.
pub fn conversation_routes(state: ConversationRouteState) -> Router {
    Router::new()
        .route("/api/conversations", post(start_conversation))
        .route(
            "/api/conversations/{id}",
            get(get_conversation).delete(end_conversation),
        )
        .route("/api/conversations/{id}/messages", post(post_message))
        .with_state(state)
}
