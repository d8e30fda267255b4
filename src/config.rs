//! Configuration types.
//!
//! Everything here is a plain value built once at startup and handed to the
//! components that need it. Nothing reads the environment after `main`.

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Default model used for enrichment calls.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Language of the assistant's prompt table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    /// Resolve a language code, falling back to English for anything unknown.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        // Accept regional tags like "es-MX".
        match lower.split(['-', '_']).next().unwrap_or_default() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "fr" => Ok(Self::Fr),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Es => write!(f, "es"),
            Self::Fr => write!(f, "fr"),
        }
    }
}

/// Tone the assistant takes when asking the model for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    #[default]
    Friendly,
    Professional,
    Enthusiastic,
}

impl Personality {
    /// One-line tone instruction for model prompts.
    pub fn tone(&self) -> &'static str {
        match self {
            Self::Friendly => "Write in a warm, friendly tone.",
            Self::Professional => "Write in a concise, professional tone.",
            Self::Enthusiastic => "Write in an upbeat, enthusiastic tone.",
        }
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friendly" => Ok(Self::Friendly),
            "professional" => Ok(Self::Professional),
            "enthusiastic" => Ok(Self::Enthusiastic),
            other => Err(format!("unsupported personality: {other}")),
        }
    }
}

/// Per-deployment assistant settings, threaded into prompt selection and
/// enrichment calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantSettings {
    pub language: Language,
    pub personality: Personality,
}

/// Remote enrichment settings. Absent when no API key is configured.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub api_key: SecretString,
    pub model: String,
}

/// Classifier tuning.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Upper bound on the remote enrichment call, including the uniqueness
    /// check of the code it returns.
    pub enrichment_timeout: Duration,
    /// How many random draws to try before giving up on a unique code.
    pub code_attempts: u32,
    /// Upper bound on all uniqueness lookups for one locally issued code.
    pub store_timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enrichment_timeout: Duration::from_millis(5000),
            code_attempts: 5,
            store_timeout: Duration::from_millis(500),
        }
    }
}

/// How long conversations stay in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Drop an unfinished conversation after this long without an answer.
    pub idle_ttl: Duration,
    /// Keep a finished conversation this long, so repeated calls still see
    /// the issued profile.
    pub completed_ttl: Duration,
    /// How often the sweep runs.
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(30 * 60),
            completed_ttl: Duration::from_secs(10 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    pub classifier: ClassifierConfig,
    pub sessions: SessionConfig,
    /// Edge length of share artifacts, in pixels.
    pub share_size: u32,
    /// Public base URL for profile pages. When set, share artifacts encode
    /// a profile URL instead of the bare code.
    pub profile_base_url: Option<String>,
    pub assistant: AssistantSettings,
    pub enrichment: Option<EnrichmentConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            classifier: ClassifierConfig::default(),
            sessions: SessionConfig::default(),
            share_size: 300,
            profile_base_url: None,
            assistant: AssistantSettings::default(),
            enrichment: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparsable values fall back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, "JETSET_PORT", defaults.port);
        let timeout_ms = parse_or(
            &lookup,
            "JETSET_ENRICH_TIMEOUT_MS",
            defaults.classifier.enrichment_timeout.as_millis() as u64,
        );
        let code_attempts = parse_or(
            &lookup,
            "JETSET_CODE_ATTEMPTS",
            defaults.classifier.code_attempts,
        )
        .max(1);
        let store_timeout_ms = parse_or(
            &lookup,
            "JETSET_STORE_TIMEOUT_MS",
            defaults.classifier.store_timeout.as_millis() as u64,
        );
        let idle_secs = parse_or(
            &lookup,
            "JETSET_SESSION_IDLE_SECS",
            defaults.sessions.idle_ttl.as_secs(),
        );
        let completed_secs = parse_or(
            &lookup,
            "JETSET_SESSION_COMPLETED_SECS",
            defaults.sessions.completed_ttl.as_secs(),
        );
        let share_size = parse_or(&lookup, "JETSET_SHARE_SIZE", defaults.share_size);

        let profile_base_url = lookup("JETSET_PROFILE_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let language = lookup("JETSET_LANGUAGE")
            .map(|s| Language::from_code(&s))
            .unwrap_or_default();
        let personality = parse_or(&lookup, "JETSET_PERSONALITY", Personality::default());

        let enrichment = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .map(|key| EnrichmentConfig {
                api_key: SecretString::from(key),
                model: lookup("JETSET_MODEL")
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            });

        Self {
            port,
            classifier: ClassifierConfig {
                enrichment_timeout: Duration::from_millis(timeout_ms),
                code_attempts,
                store_timeout: Duration::from_millis(store_timeout_ms),
            },
            sessions: SessionConfig {
                idle_ttl: Duration::from_secs(idle_secs),
                completed_ttl: Duration::from_secs(completed_secs),
                sweep_interval: defaults.sessions.sweep_interval,
            },
            share_size,
            profile_base_url,
            assistant: AssistantSettings {
                language,
                personality,
            },
            enrichment,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid config value, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.classifier.enrichment_timeout, Duration::from_secs(5));
        assert_eq!(config.classifier.code_attempts, 5);
        assert_eq!(config.classifier.store_timeout, Duration::from_millis(500));
        assert_eq!(config.sessions.idle_ttl, Duration::from_secs(1800));
        assert_eq!(config.sessions.completed_ttl, Duration::from_secs(600));
        assert_eq!(config.share_size, 300);
        assert!(config.profile_base_url.is_none());
        assert_eq!(config.assistant.language, Language::En);
        assert!(config.enrichment.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("JETSET_PORT", "9000"),
            ("JETSET_ENRICH_TIMEOUT_MS", "250"),
            ("JETSET_CODE_ATTEMPTS", "3"),
            ("JETSET_STORE_TIMEOUT_MS", "50"),
            ("JETSET_SESSION_IDLE_SECS", "120"),
            ("JETSET_SESSION_COMPLETED_SECS", "30"),
            ("JETSET_PROFILE_BASE_URL", "https://jetset.example/"),
            ("JETSET_LANGUAGE", "es-MX"),
            ("JETSET_PERSONALITY", "Professional"),
            ("GEMINI_API_KEY", "secret"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.classifier.enrichment_timeout, Duration::from_millis(250));
        assert_eq!(config.classifier.code_attempts, 3);
        assert_eq!(config.classifier.store_timeout, Duration::from_millis(50));
        assert_eq!(config.sessions.idle_ttl, Duration::from_secs(120));
        assert_eq!(config.sessions.completed_ttl, Duration::from_secs(30));
        assert_eq!(
            config.profile_base_url.as_deref(),
            Some("https://jetset.example")
        );
        assert_eq!(config.assistant.language, Language::Es);
        assert_eq!(config.assistant.personality, Personality::Professional);

        let enrichment = config.enrichment.unwrap();
        assert_eq!(enrichment.api_key.expose_secret(), "secret");
        assert_eq!(enrichment.model, DEFAULT_MODEL);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("JETSET_PORT", "not-a-port"),
            ("JETSET_CODE_ATTEMPTS", "0"),
            ("JETSET_PERSONALITY", "grumpy"),
            ("GEMINI_API_KEY", "   "),
        ]);
        assert_eq!(config.port, 8080);
        // Zero attempts would never issue a code.
        assert_eq!(config.classifier.code_attempts, 1);
        assert_eq!(config.assistant.personality, Personality::Friendly);
        assert!(config.enrichment.is_none());
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(Language::from_code("de"), Language::En);
        assert_eq!(Language::from_code("FR"), Language::Fr);
        assert_eq!(Language::from_code(""), Language::En);
    }
}
