//! Gemini REST provider.
//!
//! Calls `generateContent` directly over HTTPS. System messages are folded
//! into `systemInstruction`; assistant turns map to the `model` role.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

use super::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Role,
};

const PROVIDER: &str = "gemini";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// `LlmProvider` backed by the Gemini HTTP API.
pub struct GeminiProvider {
    client: Client,
    api_key: SecretString,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
        }
    }

    fn build_body(request: &CompletionRequest) -> GenerateContentRequest {
        let system_text: Vec<&str> = request
            .messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();

        let system_instruction = (!system_text.is_empty()).then(|| Content {
            role: None,
            parts: vec![Part {
                text: system_text.join("\n\n"),
            }],
        });

        let contents = request
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(to_content)
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

fn to_content(message: &ChatMessage) -> Content {
    let role = match message.role {
        Role::Assistant => "model",
        _ => "user",
    };
    Content {
        role: Some(role.to_string()),
        parts: vec![Part {
            text: message.content.clone(),
        }],
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = format!("{BASE_URL}/{}:generateContent", self.model);
        let body = Self::build_body(&request);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &text));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!("undecodable body: {e}"),
            })?;

        extract_completion(parsed)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_completion(response: GenerateContentResponse) -> Result<CompletionResponse, LlmError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: "no candidates".to_string(),
        })?;

    let content: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(LlmError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: "candidate has no text".to_string(),
        });
    }

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some(_) => FinishReason::Other,
    };

    Ok(CompletionResponse {
        content,
        finish_reason,
    })
}

fn map_http_error(status: StatusCode, body: &str) -> LlmError {
    let reason = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .map(|w| {
            let msg = w.error.message.unwrap_or_default();
            match w.error.status {
                Some(s) if !s.is_empty() => format!("{s}: {msg}"),
                _ => msg,
            }
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    LlmError::RequestFailed {
        provider: PROVIDER.to_string(),
        reason: format!("HTTP {}: {}", status.as_u16(), reason),
    }
}
