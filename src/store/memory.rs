//! In-memory `ProfileStore`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::conversation::ConversationRecord;
use crate::error::StoreError;

use super::traits::{ProfileStore, TravelerProfile};

/// Process-local profile store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, TravelerProfile>>,
    conversations: RwLock<HashMap<String, ConversationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn code_exists(&self, code: &str) -> Result<bool, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().any(|p| p.classification.code == code))
    }

    async fn save_profile(&self, profile: &TravelerProfile) -> Result<(), StoreError> {
        debug!(
            user_id = %profile.user_id,
            code = %profile.classification.code,
            "Saving traveler profile"
        );
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<TravelerProfile>, StoreError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save_conversation(
        &self,
        user_id: &str,
        record: &ConversationRecord,
    ) -> Result<(), StoreError> {
        self.conversations
            .write()
            .await
            .insert(user_id.to_string(), record.clone());
        Ok(())
    }

    async fn get_conversation(
        &self,
        user_id: &str,
    ) -> Result<Option<ConversationRecord>, StoreError> {
        Ok(self.conversations.read().await.get(user_id).cloned())
    }
}
