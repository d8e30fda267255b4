//! Planning conversation: the fixed question sequence that collects a
//! visitor's destination, budget, dates, companions, and interests.
//!
//! The record is a plain value mutated only by `submit_answer`. Sessions
//! wrap records for the HTTP layer, serialize answers per session, and expire
//! once idle or finished.

pub mod machine;
pub mod prompts;
pub mod record;
pub mod routes;
pub mod sessions;
pub mod state;

pub use machine::{InputError, StepOutcome, submit_answer};
pub use prompts::{PromptKey, prompt_text};
pub use record::{BudgetTier, ConversationRecord, Travelers};
pub use routes::{ConversationRouteState, ShareSettings, conversation_routes};
pub use sessions::{
    IssuedProfile, Session, SessionIdentity, SessionRegistry, spawn_expiry_task,
};
pub use state::ConversationStep;
