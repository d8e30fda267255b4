//! Slot store: the partially filled answers of one planning conversation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::state::ConversationStep;

// "no budget limit" and "spare no expense" mean the opposite of a tight
// budget, so they are checked before the budget words.
static LUXURY_BUDGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(luxur\w*|premium|splurge|high[- ]end|lavish|unlimited|no (budget|limit|expense)|money is no object)\b",
    )
    .expect("luxury budget pattern is valid")
});

static TIGHT_BUDGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(budget|cheap\w*|affordable|low[- ]cost|backpack\w*|tight|econom\w*|shoestring|frugal)\b",
    )
    .expect("tight budget pattern is valid")
});

static FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(famil\w*|kids?|children|child|parents|sons?|daughters?)\b")
        .expect("family pattern is valid")
});

static PARTNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(partner|wife|husband|spouse|couple|girlfriend|boyfriend|fianc[eé]e?|honeymoon)\b",
    )
    .expect("partner pattern is valid")
});

static FRIENDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(friends?|group|buddies|mates)\b").expect("friends pattern is valid")
});

static SOLO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(solo|alone|myself|just me)\b").expect("solo pattern is valid")
});

/// Separators between interests. Splits on the word "and" too, so compound
/// names like "rock and roll" become two entries.
static INTEREST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[,;\n]|\band\b").expect("interest separator pattern is valid")
});

/// Budget bucket a free-text answer falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// Bucket a free-text budget answer by keyword.
    pub fn from_answer(text: &str) -> Self {
        if LUXURY_BUDGET.is_match(text) {
            Self::Luxury
        } else if TIGHT_BUDGET.is_match(text) {
            Self::Budget
        } else {
            Self::Moderate
        }
    }

    /// Label used in `UserPreferences.budget`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget-friendly",
            Self::Moderate => "Moderate",
            Self::Luxury => "Luxury",
        }
    }
}

/// Who the visitor is traveling with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Travelers {
    Solo,
    Partner,
    Family,
    Friends,
    /// Answer that matched no known group, kept verbatim.
    Other(String),
}

impl Travelers {
    /// Classify a free-text companion answer by keyword.
    pub fn from_answer(text: &str) -> Self {
        if FAMILY.is_match(text) {
            Self::Family
        } else if PARTNER.is_match(text) {
            Self::Partner
        } else if FRIENDS.is_match(text) {
            Self::Friends
        } else if SOLO.is_match(text) {
            Self::Solo
        } else {
            Self::Other(text.trim().to_string())
        }
    }

    /// Label used in `UserPreferences.travelCompanions`.
    pub fn label(&self) -> &str {
        match self {
            Self::Solo => "Solo",
            Self::Partner => "Partner",
            Self::Family => "Family",
            Self::Friends => "Friends",
            Self::Other(text) => text,
        }
    }
}

/// The slot record for one planning conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub destination: String,
    pub budget: Option<BudgetTier>,
    pub dates: String,
    pub travelers: Option<Travelers>,
    pub interests: Vec<String>,
    pub step: ConversationStep,
    pub started: bool,
}

impl ConversationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the slot owned by `step` holds an answer.
    ///
    /// `Greeting` is filled once the conversation has started; `Summary`
    /// owns no slot.
    pub fn is_filled(&self, step: ConversationStep) -> bool {
        match step {
            ConversationStep::Greeting => self.started,
            ConversationStep::Destination => !self.destination.is_empty(),
            ConversationStep::Budget => self.budget.is_some(),
            ConversationStep::Dates => !self.dates.is_empty(),
            ConversationStep::Travelers => self.travelers.is_some(),
            ConversationStep::Interests => !self.interests.is_empty(),
            ConversationStep::Summary => true,
        }
    }

    /// Whether every step before the current one has been answered.
    pub fn is_consistent(&self) -> bool {
        ConversationStep::ORDER
            .iter()
            .take_while(|s| **s != self.step)
            .all(|s| self.is_filled(*s))
    }

    /// Store a trimmed, non-empty answer into the slot owned by `step`.
    pub(crate) fn fill(&mut self, step: ConversationStep, answer: &str) {
        match step {
            ConversationStep::Greeting => self.started = true,
            ConversationStep::Destination => self.destination = answer.to_string(),
            ConversationStep::Budget => self.budget = Some(BudgetTier::from_answer(answer)),
            ConversationStep::Dates => self.dates = answer.to_string(),
            ConversationStep::Travelers => self.travelers = Some(Travelers::from_answer(answer)),
            ConversationStep::Interests => self.interests = split_interests(answer),
            ConversationStep::Summary => {}
        }
    }
}

/// Split an interests answer into entries, preserving order and duplicates.
///
/// An answer made only of separators is kept whole so the slot is never
/// left empty.
pub fn split_interests(answer: &str) -> Vec<String> {
    let items: Vec<String> = INTEREST_SEPARATOR
        .split(answer)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();

    if items.is_empty() {
        vec![answer.trim().to_string()]
    } else {
        items
    }
}
