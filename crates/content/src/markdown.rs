//! Inline markdown fragmenting for the view target.
//!
//! This is deliberately not a markdown grammar: the text has already
//! been normalized, so the only structure recognized is bullets and
//! line breaks. Emphasis markers are stripped rather than converted to
//! styling, which avoids re-interpreting cleaned text as new markup.

const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

/// One inline fragment of rendered text.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A bulleted line (marker already removed).
    Bullet(String),
    /// An ordinary line of prose.
    Paragraph(String),
    /// An explicit blank line.
    Break,
}

/// Splits cleaned text into an ordered sequence of fragments.
/// Stateless; the same input always yields the same sequence.
pub fn fragments(text: &str) -> Vec<Fragment> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Fragment::Break;
            }
            match trimmed.chars().next() {
                Some(c) if BULLET_MARKERS.contains(&c) => {
                    let rest = trimmed[c.len_utf8()..].trim_start();
                    Fragment::Bullet(strip_emphasis(rest))
                }
                _ => Fragment::Paragraph(strip_emphasis(trimmed)),
            }
        })
        .collect()
}

fn strip_emphasis(text: &str) -> String {
    text.replace('*', "")
}
