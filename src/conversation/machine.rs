//! Answer handling: validates input, fills slots, and advances the step.

use serde::Serialize;
use tracing::debug;

use super::prompts::PromptKey;
use super::record::ConversationRecord;

/// Why an answer was rejected without advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum InputError {
    #[error("answer is empty")]
    Empty,
}

/// What the caller should show after an answer was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The answer was accepted; ask this next.
    Next(PromptKey),
    /// The answer was rejected; ask the same question again.
    Retry { prompt: PromptKey, error: InputError },
    /// Every slot is filled.
    Complete,
}

impl StepOutcome {
    /// The prompt to display for this outcome.
    pub fn prompt_key(&self) -> PromptKey {
        match self {
            Self::Next(key) => *key,
            Self::Retry { prompt, .. } => *prompt,
            Self::Complete => PromptKey::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Submit one answer for the record's current step.
///
/// Empty answers leave the record untouched and re-issue the same prompt.
/// Once the record reaches `Summary`, every call returns `Complete` without
/// mutating anything.
pub fn submit_answer(record: &mut ConversationRecord, raw_text: &str) -> StepOutcome {
    let step = record.step;
    let Some(next) = step.next() else {
        return StepOutcome::Complete;
    };

    let answer = raw_text.trim();
    if answer.is_empty() {
        debug!(step = %step, "Empty answer, re-prompting");
        return StepOutcome::Retry {
            prompt: step.prompt_key(),
            error: InputError::Empty,
        };
    }

    record.fill(step, answer);
    record.step = next;
    debug!(from = %step, to = %next, "Conversation advanced");

    if next.is_terminal() {
        StepOutcome::Complete
    } else {
        StepOutcome::Next(next.prompt_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::record::{BudgetTier, Travelers};
    use crate::conversation::state::ConversationStep;

    const ANSWERS: [&str; 6] = [
        "hi there",
        "Kyoto",
        "luxury please",
        "April 3 to April 17",
        "with my partner",
        "temples, food and gardens",
    ];

    #[test]
    fn full_walk_reaches_summary_with_every_slot_filled() {
        let mut record = ConversationRecord::new();
        let mut outcomes = Vec::new();
        for answer in ANSWERS {
            outcomes.push(submit_answer(&mut record, answer));
            assert!(record.is_consistent());
        }

        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Next(PromptKey::AskDestination),
                StepOutcome::Next(PromptKey::AskBudget),
                StepOutcome::Next(PromptKey::AskDates),
                StepOutcome::Next(PromptKey::AskTravelers),
                StepOutcome::Next(PromptKey::AskInterests),
                StepOutcome::Complete,
            ]
        );
        assert_eq!(record.step, ConversationStep::Summary);
        assert!(record.started);
        assert_eq!(record.destination, "Kyoto");
        assert_eq!(record.budget, Some(BudgetTier::Luxury));
        assert_eq!(record.dates, "April 3 to April 17");
        assert_eq!(record.travelers, Some(Travelers::Partner));
        assert_eq!(record.interests, vec!["temples", "food", "gardens"]);
    }

    #[test]
    fn seventh_answer_is_idempotent() {
        let mut record = ConversationRecord::new();
        for answer in ANSWERS {
            submit_answer(&mut record, answer);
        }
        let snapshot = record.clone();

        assert_eq!(submit_answer(&mut record, "one more thing"), StepOutcome::Complete);
        assert_eq!(submit_answer(&mut record, ""), StepOutcome::Complete);
        assert_eq!(record, snapshot);
    }

    #[test]
    fn blank_answers_never_advance() {
        let mut record = ConversationRecord::new();
        for blank in ["", "   ", "\n\t"] {
            let outcome = submit_answer(&mut record, blank);
            assert_eq!(
                outcome,
                StepOutcome::Retry {
                    prompt: PromptKey::Greeting,
                    error: InputError::Empty,
                }
            );
            assert_eq!(record.step, ConversationStep::Greeting);
            assert!(!record.started);
        }

        submit_answer(&mut record, "hello");
        submit_answer(&mut record, "Lima");
        let outcome = submit_answer(&mut record, "  ");
        assert_eq!(outcome.prompt_key(), PromptKey::AskBudget);
        assert_eq!(record.step, ConversationStep::Budget);
        assert!(record.budget.is_none());
    }

    #[test]
    fn answers_are_trimmed_before_storing() {
        let mut record = ConversationRecord::new();
        submit_answer(&mut record, "hey");
        submit_answer(&mut record, "   Reykjavik  ");
        assert_eq!(record.destination, "Reykjavik");
    }

    #[test]
    fn greeting_only_marks_started() {
        let mut record = ConversationRecord::new();
        submit_answer(&mut record, "Paris please!");
        assert!(record.started);
        // Not inferred from the greeting.
        assert!(record.destination.is_empty());
        assert_eq!(record.step, ConversationStep::Destination);
    }
}
