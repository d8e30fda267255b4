//! Conversation step machine: tracks which question the visitor is on.

use serde::{Deserialize, Serialize};

use super::prompts::PromptKey;

/// The steps of the planning conversation.
///
/// Progresses linearly: Greeting → Destination → Budget → Dates →
/// Travelers → Interests → Summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    #[default]
    Greeting,
    Destination,
    Budget,
    Dates,
    Travelers,
    Interests,
    Summary,
}

impl ConversationStep {
    /// All steps in asking order.
    pub const ORDER: [ConversationStep; 7] = [
        Self::Greeting,
        Self::Destination,
        Self::Budget,
        Self::Dates,
        Self::Travelers,
        Self::Interests,
        Self::Summary,
    ];

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: ConversationStep) -> bool {
        self.next() == Some(target)
    }

    /// Whether this step is terminal (no more questions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Summary)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<ConversationStep> {
        use ConversationStep::*;
        match self {
            Greeting => Some(Destination),
            Destination => Some(Budget),
            Budget => Some(Dates),
            Dates => Some(Travelers),
            Travelers => Some(Interests),
            Interests => Some(Summary),
            Summary => None,
        }
    }

    /// The prompt shown while waiting for this step's answer.
    pub fn prompt_key(&self) -> PromptKey {
        match self {
            Self::Greeting => PromptKey::Greeting,
            Self::Destination => PromptKey::AskDestination,
            Self::Budget => PromptKey::AskBudget,
            Self::Dates => PromptKey::AskDates,
            Self::Travelers => PromptKey::AskTravelers,
            Self::Interests => PromptKey::AskInterests,
            Self::Summary => PromptKey::Complete,
        }
    }
}

impl std::fmt::Display for ConversationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::Destination => "destination",
            Self::Budget => "budget",
            Self::Dates => "dates",
            Self::Travelers => "travelers",
            Self::Interests => "interests",
            Self::Summary => "summary",
        };
        write!(f, "{s}")
    }
}
