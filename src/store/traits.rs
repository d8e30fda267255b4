//! `ProfileStore` trait and the records it persists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{ClassificationResult, ClassificationSource, UserPreferences};
use crate::conversation::ConversationRecord;
use crate::error::StoreError;

/// A traveler profile as persisted after classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelerProfile {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub classification: ClassificationResult,
    pub preferences: UserPreferences,
    pub source: ClassificationSource,
    pub created_at: DateTime<Utc>,
}

/// Backend-agnostic store for profiles and conversation records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Whether any stored profile already carries `code`.
    async fn code_exists(&self, code: &str) -> Result<bool, StoreError>;

    /// Insert or replace the profile for `profile.user_id`.
    async fn save_profile(&self, profile: &TravelerProfile) -> Result<(), StoreError>;

    /// Get the profile for a user.
    async fn get_profile(&self, user_id: &str) -> Result<Option<TravelerProfile>, StoreError>;

    /// Insert or replace the finished conversation for a user.
    async fn save_conversation(
        &self,
        user_id: &str,
        record: &ConversationRecord,
    ) -> Result<(), StoreError>;

    /// Get the last finished conversation for a user.
    async fn get_conversation(
        &self,
        user_id: &str,
    ) -> Result<Option<ConversationRecord>, StoreError>;
}
