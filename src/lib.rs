//! JetSet: conversational trip intake and traveler-profile classification.

pub mod classify;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod server;
pub mod share;
pub mod store;
