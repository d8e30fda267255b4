//! Persistence collaborator for issued profiles and finished conversations.
//!
//! The service only needs a key-value document store addressed by user id.
//! `MemoryStore` is the in-process implementation; deployments can plug in
//! anything that implements `ProfileStore`.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{ProfileStore, TravelerProfile};
