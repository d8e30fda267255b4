//! In-memory registry of active planning conversations.
//!
//! Each session sits behind its own mutex so answers within one session are
//! applied strictly in order, while different sessions never contend.
//! Idle and finished sessions are dropped by a periodic sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::classify::ClassificationResult;
use crate::config::SessionConfig;

use super::record::ConversationRecord;

/// Who a session belongs to, if the caller told us.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Profile issued at the end of a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedProfile {
    #[serde(flatten)]
    pub classification: ClassificationResult,
    /// Data URI of the share artifact.
    pub share_artifact: String,
}

/// One planning conversation.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub identity: SessionIdentity,
    pub record: ConversationRecord,
    /// Set once, when the record first reaches `Summary`.
    pub issued: Option<IssuedProfile>,
    /// When the last answer was submitted.
    pub last_active: DateTime<Utc>,
    /// When the profile was issued.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Session {
    fn new(identity: SessionIdentity) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            record: ConversationRecord::new(),
            issued: None,
            last_active: Utc::now(),
            completed_at: None,
        }
    }

    /// Record activity on this session.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// Store the issued profile and start the completed-session window.
    pub fn complete(&mut self, issued: IssuedProfile) {
        self.issued = Some(issued);
        self.completed_at = Some(Utc::now());
    }

    /// Whether the sweep should drop this session at `now`.
    ///
    /// Finished sessions expire `completed_ttl` after completion; unfinished
    /// ones expire `idle_ttl` after their last answer.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: &SessionConfig) -> bool {
        match self.completed_at {
            Some(at) => elapsed_at_least(at, now, ttl.completed_ttl),
            None => elapsed_at_least(self.last_active, now, ttl.idle_ttl),
        }
    }

    /// Key the persistence collaborator stores this session's results under.
    pub fn user_key(&self) -> String {
        self.identity
            .user_id
            .clone()
            .or_else(|| self.identity.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

fn elapsed_at_least(since: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    // A negative delta (clock skew) means not yet elapsed.
    (now - since).to_std().is_ok_and(|elapsed| elapsed >= ttl)
}

/// Registry of active sessions keyed by session id.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    ttl: SessionConfig,
}

impl SessionRegistry {
    pub fn new(ttl: SessionConfig) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        })
    }

    /// Start a new conversation and return its id and handle.
    pub async fn start(&self, identity: SessionIdentity) -> (Uuid, SessionHandle) {
        let session = Session::new(identity);
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        info!(session_id = %id, "Conversation started");
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Discard a session. Returns whether it existed.
    pub async fn end(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Conversation ended");
        }
        removed
    }

    /// Drop sessions that are expired at `now`. Sessions currently locked
    /// by a request are in use and kept.
    /// Returns the number of sessions dropped.
    pub async fn expire_old(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, handle| match handle.try_lock() {
            Ok(session) => {
                let expired = session.is_expired(now, &self.ttl);
                if expired {
                    debug!(session_id = %id, "Conversation expired");
                }
                !expired
            }
            Err(_) => true,
        });

        let expired_count = before - sessions.len();
        if expired_count > 0 {
            info!(count = expired_count, remaining = sessions.len(), "Expired conversations");
        }
        expired_count
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn a background task that periodically drops expired sessions.
pub fn spawn_expiry_task(registry: Arc<SessionRegistry>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(registry.ttl.sweep_interval);
        loop {
            interval.tick().await;
            registry.expire_old(Utc::now()).await;
        }
    })
}
