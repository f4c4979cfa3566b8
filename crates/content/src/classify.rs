//! Content classification.
//!
//! The upstream pipeline emits sections whose `text` may be prose,
//! markdown-ish text, a JSON value, or a JSON value serialized into a
//! string (sometimes inside a fenced code block, sometimes with escaped
//! control sequences). [`classify`] resolves all of that into one
//! explicit tagged-variant tree that both emitters walk.
//!
//! Classification is a pure function: no side effects, and the same
//! input always yields the same tree.

use crate::keys::{TITLE_KEY_PRIORITY, is_hidden_key};
use serde_json::Value;

/// Classified report content, shared by the view renderer and the PDF
/// composer.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    /// A bare scalar (number, boolean, null).
    Primitive(String),
    /// Prose or markdown-ish text.
    Markdown(String),
    /// An array of scalars, rendered as a single tag group.
    PrimitiveList(Vec<String>),
    /// An array of records, rendered as a card grid.
    RecordList(Vec<RecordCard>),
    /// An ordered key/value mapping. Hidden keys are already removed.
    Record(Vec<(String, ContentNode)>),
}

/// One card in a [`ContentNode::RecordList`]. The title, when present,
/// was extracted from the record's field set and does not reappear in
/// `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCard {
    pub title: Option<String>,
    pub body: ContentNode,
}

/// Classifies an arbitrary JSON value into a [`ContentNode`] tree.
pub fn classify(value: &Value) -> ContentNode {
    match value {
        Value::String(s) => match parse_embedded_json(s) {
            Some(parsed) => classify(&parsed),
            None => ContentNode::Markdown(s.clone()),
        },
        Value::Number(n) => ContentNode::Primitive(n.to_string()),
        Value::Bool(b) => ContentNode::Primitive(b.to_string()),
        Value::Null => ContentNode::Primitive(String::new()),
        Value::Array(items) => classify_array(items),
        Value::Object(map) => classify_object(map),
    }
}

fn classify_array(items: &[Value]) -> ContentNode {
    if items.iter().all(is_primitive_item) {
        let tags = items.iter().map(scalar_text).collect();
        return ContentNode::PrimitiveList(tags);
    }
    let cards = items.iter().map(classify_card).collect();
    ContentNode::RecordList(cards)
}

fn classify_object(map: &serde_json::Map<String, Value>) -> ContentNode {
    let visible: Vec<(&String, &Value)> =
        map.iter().filter(|(k, _)| !is_hidden_key(k)).collect();

    // Wrapper elision: an object that only carries a "text" payload is
    // classified as that payload directly.
    if visible.len() == 1 && visible[0].0 == "text" {
        return classify(visible[0].1);
    }

    let fields = visible
        .iter()
        .filter(|(k, _)| !(k.as_str() == "text" && visible.len() > 1))
        .map(|(k, v)| ((*k).clone(), classify(v)))
        .collect::<Vec<_>>();
    ContentNode::Record(fields)
}

fn classify_card(item: &Value) -> RecordCard {
    // Array elements may themselves be serialized JSON records.
    if let Value::String(s) = item
        && let Some(parsed) = parse_embedded_json(s)
    {
        return classify_card(&parsed);
    }
    let Value::Object(map) = item else {
        return RecordCard { title: None, body: classify(item) };
    };

    let title_key = TITLE_KEY_PRIORITY.iter().find(|k| map.contains_key(**k));
    let Some(&title_key) = title_key else {
        return RecordCard { title: None, body: classify_object(map) };
    };

    let title = map.get(title_key).map(scalar_text);
    let mut remaining = map.clone();
    remaining.remove(title_key);
    // The short indicator code duplicates indicator_full_name.
    if title_key == "indicator_full_name" {
        remaining.remove("indicator");
    }
    RecordCard { title, body: classify_object(&remaining) }
}

/// A value counts as primitive for tag-group purposes unless it is a
/// container or a string that itself holds serialized JSON.
fn is_primitive_item(value: &Value) -> bool {
    match value {
        Value::Number(_) | Value::Bool(_) => true,
        Value::String(s) => parse_embedded_json(s).is_none(),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Attempts to parse a string that looks like serialized JSON.
///
/// Fenced-code markers are stripped first. If a direct parse fails and
/// the string carries literal `\n`/`\"` sequences, one round of
/// unescaping is tried before giving up. Failure is never an error:
/// the caller falls back to markdown.
fn parse_embedded_json(raw: &str) -> Option<Value> {
    let trimmed = strip_fence(raw.trim());
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return None;
    }
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }
    if trimmed.contains("\\n") || trimmed.contains("\\\"") {
        let unescaped = trimmed
            .replace("\\n", "\n")
            .replace("\\\"", "\"")
            .replace("\\\\", "\\");
        if let Ok(value) = serde_json::from_str(&unescaped) {
            return Some(value);
        }
    }
    None
}

/// Strips a surrounding fenced code block marker, if present.
fn strip_fence(text: &str) -> &str {
    let mut inner = text;
    for prefix in ["```json", "```"] {
        if let Some(rest) = inner.strip_prefix(prefix) {
            inner = rest.trim_start();
            break;
        }
    }
    if inner.len() != text.len()
        && let Some(rest) = inner.strip_suffix("```")
    {
        inner = rest.trim_end();
    }
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_classify_as_primitives() {
        assert_eq!(classify(&json!(42)), ContentNode::Primitive("42".into()));
        assert_eq!(classify(&json!(true)), ContentNode::Primitive("true".into()));
    }

    #[test]
    fn prose_classifies_as_markdown() {
        let node = classify(&json!("Strong quarter with revenue growth."));
        assert_eq!(
            node,
            ContentNode::Markdown("Strong quarter with revenue growth.".into())
        );
    }

    #[test]
    fn classification_is_idempotent_for_primitives() {
        let first = classify(&json!("BUY"));
        let again = classify(&json!("BUY"));
        assert_eq!(first, again);
        assert!(matches!(first, ContentNode::Markdown(_)));
    }

    #[test]
    fn json_string_is_reclassified() {
        let node = classify(&json!(r#"{"decision": "BUY"}"#));
        let ContentNode::Record(fields) = node else {
            panic!("expected record");
        };
        assert_eq!(fields[0].0, "decision");
    }

    #[test]
    fn fenced_json_string_is_reclassified() {
        let raw = "```json\n{\"trend\": \"up\"}\n```";
        let node = classify(&json!(raw));
        assert!(matches!(node, ContentNode::Record(_)));
    }

    #[test]
    fn escaped_json_string_is_reclassified() {
        let raw = "{\\n \\\"score\\\": 7\\n}";
        let node = classify(&json!(raw));
        assert!(matches!(node, ContentNode::Record(_)));
    }

    #[test]
    fn malformed_json_string_falls_back_to_markdown() {
        let raw = "{not valid json at all";
        let node = classify(&json!(raw));
        assert_eq!(node, ContentNode::Markdown(raw.into()));
    }

    #[test]
    fn primitive_array_becomes_one_tag_group() {
        let node = classify(&json!(["AAPL", "MSFT", "GOOG"]));
        assert_eq!(
            node,
            ContentNode::PrimitiveList(vec!["AAPL".into(), "MSFT".into(), "GOOG".into()])
        );
    }

    #[test]
    fn empty_array_is_an_empty_tag_group() {
        assert_eq!(classify(&json!([])), ContentNode::PrimitiveList(vec![]));
    }

    #[test]
    fn object_array_becomes_record_list_with_extracted_titles() {
        let node = classify(&json!([
            {"headline": "Rate cut expected", "impact": "positive"},
            {"summary": "no title key here"}
        ]));
        let ContentNode::RecordList(cards) = node else {
            panic!("expected record list");
        };
        assert_eq!(cards[0].title.as_deref(), Some("Rate cut expected"));
        // Title exclusivity: the extracted key is gone from the body.
        let ContentNode::Record(fields) = &cards[0].body else {
            panic!("expected record body");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "impact");
        assert_eq!(cards[1].title, None);
    }

    #[test]
    fn indicator_full_name_title_also_drops_indicator_code() {
        let node = classify(&json!([
            {"indicator_full_name": "Relative Strength Index", "indicator": "rsi", "value": 55}
        ]));
        let ContentNode::RecordList(cards) = node else {
            panic!("expected record list");
        };
        let ContentNode::Record(fields) = &cards[0].body else {
            panic!("expected record body");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "value");
    }

    #[test]
    fn hidden_keys_never_survive_classification() {
        let node = classify(&json!({
            "analysis": "useful",
            "selected_indicators": ["rsi"],
            "_dedup_key": "x",
            "metadata": {"internal": true}
        }));
        let ContentNode::Record(fields) = node else {
            panic!("expected record");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "analysis");
    }

    #[test]
    fn text_only_wrapper_is_elided() {
        let node = classify(&json!({"text": "plain prose", "raw": "hidden"}));
        assert_eq!(node, ContentNode::Markdown("plain prose".into()));
    }

    #[test]
    fn text_wrapper_with_embedded_json_reclassifies() {
        let node = classify(&json!({"text": "{\"verdict\": \"HOLD\"}"}));
        assert!(matches!(node, ContentNode::Record(_)));
    }

    #[test]
    fn nested_json_strings_inside_records_are_deep_classified() {
        let node = classify(&json!({"detail": "[\"a\", \"b\"]"}));
        let ContentNode::Record(fields) = node else {
            panic!("expected record");
        };
        assert_eq!(
            fields[0].1,
            ContentNode::PrimitiveList(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn array_with_json_object_strings_is_a_record_list() {
        let node = classify(&json!(["{\"name\": \"momentum\"}"]));
        let ContentNode::RecordList(cards) = node else {
            panic!("expected record list");
        };
        assert_eq!(cards[0].title.as_deref(), Some("momentum"));
    }
}
