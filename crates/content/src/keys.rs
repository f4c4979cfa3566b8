//! Shared key sets used by the classifier and both emitters.
//!
//! These are product-tuned constants, not derived values. They are kept
//! in one place so the view renderer and the PDF composer can never
//! disagree about what is hidden or emphasized.

/// Keys that are always excluded from any rendered output.
///
/// The classifier removes these while building a record, so neither
/// emitter ever sees them.
pub const HIDDEN_KEYS: &[&str] = &[
    "selected_indicators",
    "memory_application",
    "count",
    "raw",
    "_dedup_key",
    "indicator",
    "validation_notes",
    "metadata",
];

/// Candidate keys promoted to a card title when rendering a record list,
/// scanned in priority order. The first match wins and is removed from
/// the card's field set.
pub const TITLE_KEY_PRIORITY: &[&str] = &[
    "headline",
    "topic",
    "indicator_full_name",
    "title",
    "name",
    "section_name",
];

/// Field-key keywords that mark a decision/recommendation field.
pub const DECISION_KEYWORDS: &[&str] = &["decision", "recommendation", "verdict"];

/// Field-key keywords that mark a summary/overview field.
pub const SUMMARY_KEYWORDS: &[&str] = &["summary", "overview"];

pub fn is_hidden_key(key: &str) -> bool {
    HIDDEN_KEYS.contains(&key)
}

pub fn is_decision_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    DECISION_KEYWORDS.iter().any(|k| key.contains(k))
}

pub fn is_summary_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SUMMARY_KEYWORDS.iter().any(|k| key.contains(k))
}
