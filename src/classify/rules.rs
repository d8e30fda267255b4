//! Ordered travel-type rule table.
//!
//! The caller's tag list is scanned in its own order; the first tag that
//! names a rule decides the category. Table order only matters for
//! presentation, never for tie-breaking.

/// One travel-type rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelTypeRule {
    /// Tag as supplied by callers, e.g. "Luxury Travel".
    pub tag: &'static str,
    /// Human-readable category.
    pub category: &'static str,
    /// 2–4 letter code prefix.
    pub prefix: &'static str,
}

pub const DEFAULT_CATEGORY: &str = "Standard Traveler";
pub const DEFAULT_PREFIX: &str = "STD";

/// Fallback when no tag matches.
pub const DEFAULT_RULE: TravelTypeRule = TravelTypeRule {
    tag: "",
    category: DEFAULT_CATEGORY,
    prefix: DEFAULT_PREFIX,
};

pub const TRAVEL_TYPE_RULES: &[TravelTypeRule] = &[
    TravelTypeRule {
        tag: "Luxury Travel",
        category: "Luxury Traveler",
        prefix: "VIP",
    },
    TravelTypeRule {
        tag: "Adventure Travel",
        category: "Adventure Seeker",
        prefix: "ADV",
    },
    TravelTypeRule {
        tag: "Business Travel",
        category: "Business Traveler",
        prefix: "BIZ",
    },
    TravelTypeRule {
        tag: "Family Travel",
        category: "Family Explorer",
        prefix: "FAM",
    },
    TravelTypeRule {
        tag: "Solo Travel",
        category: "Solo Explorer",
        prefix: "SOLO",
    },
    TravelTypeRule {
        tag: "Budget Travel",
        category: "Budget Traveler",
        prefix: "BUD",
    },
    TravelTypeRule {
        tag: "Cultural Travel",
        category: "Culture Enthusiast",
        prefix: "CUL",
    },
    TravelTypeRule {
        tag: "Eco Travel",
        category: "Eco Traveler",
        prefix: "ECO",
    },
];

/// Find the rule for a single tag (trimmed, case-insensitive).
pub fn rule_for_tag(tag: &str) -> Option<&'static TravelTypeRule> {
    let tag = tag.trim();
    TRAVEL_TYPE_RULES
        .iter()
        .find(|rule| rule.tag.eq_ignore_ascii_case(tag))
}

/// Pick the rule for the first recognized tag, or the default rule.
pub fn match_travel_types<S: AsRef<str>>(tags: &[S]) -> &'static TravelTypeRule {
    tags.iter()
        .find_map(|tag| rule_for_tag(tag.as_ref()))
        .unwrap_or(&DEFAULT_RULE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luxury_maps_to_vip() {
        let rule = match_travel_types(&["Luxury Travel"]);
        assert_eq!(rule.category, "Luxury Traveler");
        assert_eq!(rule.prefix, "VIP");
    }

    #[test]
    fn first_recognized_tag_wins() {
        let rule = match_travel_types(&["Road Trips", "Eco Travel", "Luxury Travel"]);
        assert_eq!(rule.category, "Eco Traveler");

        let rule = match_travel_types(&["Luxury Travel", "Eco Travel"]);
        assert_eq!(rule.category, "Luxury Traveler");
    }

    #[test]
    fn matching_ignores_case_and_padding() {
        assert_eq!(match_travel_types(&["  family travel "]).prefix, "FAM");
    }

    #[test]
    fn unknown_or_empty_falls_back_to_standard() {
        let empty: [&str; 0] = [];
        assert_eq!(*match_travel_types(&empty), DEFAULT_RULE);
        assert_eq!(match_travel_types(&["Space Tourism"]).category, DEFAULT_CATEGORY);
    }

    #[test]
    fn prefixes_are_two_to_four_uppercase_letters() {
        for rule in TRAVEL_TYPE_RULES.iter().chain(std::iter::once(&DEFAULT_RULE)) {
            assert!((2..=4).contains(&rule.prefix.len()), "{}", rule.prefix);
            assert!(rule.prefix.chars().all(|c| c.is_ascii_uppercase()));
        }
    }
}
