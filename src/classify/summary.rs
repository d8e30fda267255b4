//! Narrative profile summary.

const CLOSING: &str = "Your personalized travel dashboard is ready!";

const LUXURY_CLAUSE: &str =
    "Expect premium experiences, from upscale stays to exclusive access at every stop.";
const BUDGET_CLAUSE: &str =
    "We'll focus on great-value options that stretch your budget without sacrificing the experience.";
const BALANCED_CLAUSE: &str =
    "You'll get a balanced mix of comfort and affordability across your whole trip.";

const FAMILY_CLAUSE: &str =
    "Recommendations will highlight family-friendly activities and stays suited to travelers of all ages.";
const FRIENDS_CLAUSE: &str =
    "We'll surface group-friendly experiences that are perfect for sharing with friends.";
const PARTNER_CLAUSE: &str =
    "Look out for romantic getaways and experiences designed for two.";
const SOLO_CLAUSE: &str =
    "As a solo traveler, you'll find flexible options tailored to exploring on your own.";

/// Compose the profile summary for a category, budget label, and companion
/// label.
///
/// Budget and companion clauses are chosen by case-sensitive substring
/// match. Pure and total: the same inputs always give the same text.
pub fn generate_summary(category: &str, budget: &str, companions: &str) -> String {
    let budget_clause = if budget.contains("Luxury") {
        LUXURY_CLAUSE
    } else if budget.contains("Budget") {
        BUDGET_CLAUSE
    } else {
        BALANCED_CLAUSE
    };

    let companion_clause = if companions.contains("Family") {
        FAMILY_CLAUSE
    } else if companions.contains("Friends") {
        FRIENDS_CLAUSE
    } else if companions.contains("Partner") {
        PARTNER_CLAUSE
    } else {
        SOLO_CLAUSE
    };

    format!(
        "As a {category}, you'll receive tailored recommendations for your travel style. \
         {budget_clause} {companion_clause} {CLOSING}"
    )
}
