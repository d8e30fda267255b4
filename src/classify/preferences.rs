//! Classifier input, supplied directly or derived from a finished
//! conversation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::conversation::{BudgetTier, ConversationRecord, Travelers};

/// Named preference categories. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_companions: Option<String>,
}

/// Interest patterns that imply a travel type, matched on whole words.
static INTEREST_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "Adventure Travel",
            Regex::new(
                r"(?i)\b(adventur\w*|hik(e|es|ing)|div(e|es|ing)|scuba|trek\w*|surf\w*|climb\w*|safaris?|ski(s|ing)?|rafting|bungee)\b",
            )
            .expect("adventure pattern is valid"),
        ),
        (
            "Cultural Travel",
            Regex::new(
                r"(?i)\b(cultur\w*|museums?|histor\w*|arts?|galler(y|ies)|food|foodie|cuisine|architecture|temples?)\b",
            )
            .expect("cultural pattern is valid"),
        ),
        (
            "Eco Travel",
            Regex::new(
                r"(?i)\b(nature|eco|wildlife|sustainab\w*|national parks?|gardens?)\b",
            )
            .expect("eco pattern is valid"),
        ),
        (
            "Business Travel",
            Regex::new(r"(?i)\b(business|work|conferences?)\b").expect("business pattern is valid"),
        ),
    ]
});

impl UserPreferences {
    /// Derive preferences from a conversation record.
    ///
    /// Travel types are ordered budget tag first, then interest-derived tags
    /// in the order the interests were given, then the companion tag.
    pub fn from_record(record: &ConversationRecord) -> Self {
        let mut types: Vec<String> = Vec::new();
        let mut push = |tag: &str| {
            if !types.iter().any(|t| t == tag) {
                types.push(tag.to_string());
            }
        };

        match record.budget {
            Some(BudgetTier::Luxury) => push("Luxury Travel"),
            Some(BudgetTier::Budget) => push("Budget Travel"),
            _ => {}
        }

        for interest in &record.interests {
            for (tag, pattern) in INTEREST_PATTERNS.iter() {
                if pattern.is_match(interest) {
                    push(*tag);
                }
            }
        }

        match record.travelers {
            Some(Travelers::Family) => push("Family Travel"),
            Some(Travelers::Solo) => push("Solo Travel"),
            _ => {}
        }

        Self {
            travel_types: Some(types),
            budget: record.budget.map(|b| b.label().to_string()),
            travel_companions: record.travelers.as_ref().map(|t| t.label().to_string()),
        }
    }

    pub fn travel_types(&self) -> &[String] {
        self.travel_types.as_deref().unwrap_or_default()
    }

    pub fn budget(&self) -> &str {
        self.budget.as_deref().unwrap_or_default()
    }

    pub fn companions(&self) -> &str {
        self.travel_companions.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ConversationStep;

    fn record(budget: BudgetTier, travelers: Travelers, interests: &[&str]) -> ConversationRecord {
        ConversationRecord {
            destination: "Cusco".to_string(),
            budget: Some(budget),
            dates: "May".to_string(),
            travelers: Some(travelers),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            step: ConversationStep::Summary,
            started: true,
        }
    }

    #[test]
    fn luxury_family_record() {
        let prefs = UserPreferences::from_record(&record(
            BudgetTier::Luxury,
            Travelers::Family,
            &["museums", "hiking", "art"],
        ));
        assert_eq!(
            prefs.travel_types(),
            ["Luxury Travel", "Cultural Travel", "Adventure Travel", "Family Travel"]
        );
        assert_eq!(prefs.budget(), "Luxury");
        assert_eq!(prefs.companions(), "Family");
    }

    #[test]
    fn moderate_partner_with_no_known_interests() {
        let prefs = UserPreferences::from_record(&record(
            BudgetTier::Moderate,
            Travelers::Partner,
            &["nightlife"],
        ));
        assert!(prefs.travel_types().is_empty());
        assert_eq!(prefs.budget(), "Moderate");
        assert_eq!(prefs.companions(), "Partner");
    }

    #[test]
    fn budget_record_uses_budget_label() {
        let prefs =
            UserPreferences::from_record(&record(BudgetTier::Budget, Travelers::Solo, &["surfing"]));
        assert_eq!(
            prefs.travel_types(),
            ["Budget Travel", "Adventure Travel", "Solo Travel"]
        );
        assert_eq!(prefs.budget(), "Budget-friendly");
    }

    #[test]
    fn interest_keywords_match_whole_words() {
        // "parties" holds "art", "second" holds "eco", "networking" holds "work".
        let prefs = UserPreferences::from_record(&record(
            BudgetTier::Moderate,
            Travelers::Partner,
            &["beach parties", "nightlife", "networking", "second-hand shops"],
        ));
        assert!(prefs.travel_types().is_empty());

        let prefs = UserPreferences::from_record(&record(
            BudgetTier::Moderate,
            Travelers::Partner,
            &["Art galleries", "eco-lodges", "a work conference"],
        ));
        assert_eq!(
            prefs.travel_types(),
            ["Cultural Travel", "Eco Travel", "Business Travel"]
        );
    }

    #[test]
    fn deserializes_camel_case_with_missing_keys() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"travelTypes":["Eco Travel"]}"#).unwrap();
        assert_eq!(prefs.travel_types(), ["Eco Travel"]);
        assert_eq!(prefs.budget(), "");
        assert_eq!(prefs.companions(), "");

        let empty: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, UserPreferences::default());
    }
}
