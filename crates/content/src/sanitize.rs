//! Text normalization applied to raw report text before display.
//!
//! The transforms run in a fixed order and never fail; fragments the
//! rules do not recognize pass through verbatim.

/// Cleans raw report text for display.
///
/// Transform order: unescape literal control sequences, strip fenced
/// code markers, drop markdown heading lines, drop `Text:` labels and
/// stray brace lines, rewrite inline `"key": "value"` fragments as
/// `Key: value`, strip residual paired quotes, collapse runs of blank
/// lines, trim.
pub fn clean_text(raw: &str) -> String {
    let text = unescape_control_sequences(raw);
    let text = strip_code_fences(&text);
    let text = strip_heading_lines(&text);
    let text = strip_text_labels(&text);
    let text = strip_brace_lines(&text);
    let text = rewrite_inline_pairs(&text);
    let text = strip_residual_quotes(&text);
    let text = collapse_blank_lines(&text);
    text.trim().to_string()
}

/// Rewrites literal `\n`, `\"`, and `\\` sequences into the characters
/// they stand for. Applied only when such sequences are present, so
/// ordinary prose is untouched.
fn unescape_control_sequences(text: &str) -> String {
    if !text.contains("\\n") && !text.contains("\\\"") {
        return text.to_string();
    }
    text.replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Drops whole markdown heading lines (`#` through `######` followed by
/// whitespace).
fn strip_heading_lines(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !is_heading_line(line))
        .collect();
    kept.join("\n")
}

fn is_heading_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&hashes)
        && trimmed[hashes..].chars().next().is_some_and(char::is_whitespace)
}

/// Removes a leading `Text:` label (case-insensitive) from each line.
fn strip_text_labels(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let lower = line.to_ascii_lowercase();
            match lower.strip_prefix("text:") {
                Some(_) => line[5..].trim_start().to_string(),
                None => line.to_string(),
            }
        })
        .collect();
    lines.join("\n")
}

/// Drops lines that consist of a lone `{` or `}`.
fn strip_brace_lines(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let t = line.trim();
            t != "{" && t != "}"
        })
        .collect();
    kept.join("\n")
}

/// Rewrites `"key": "value"` fragments as `Key: value`, title-casing the
/// key. Anything that does not match the full pattern is left alone.
fn rewrite_inline_pairs(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '"' {
            if let Some((key, value, end)) = match_pair(&chars, i) {
                out.push_str(&title_case(&key));
                out.push_str(": ");
                out.push_str(&value);
                i = end;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Matches `"key": "value"` starting at the opening quote. Returns the
/// key, the value, and the index just past the closing quote.
fn match_pair(chars: &[char], start: usize) -> Option<(String, String, usize)> {
    let (key, mut i) = read_quoted(chars, start)?;
    if key.is_empty() {
        return None;
    }
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) != Some(&':') {
        return None;
    }
    i += 1;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    let (value, end) = read_quoted(chars, i)?;
    Some((key, value, end))
}

/// Reads a quote-delimited run starting at `start` (which must be a
/// quote). The run may not contain another quote.
fn read_quoted(chars: &[char], start: usize) -> Option<(String, usize)> {
    if chars.get(start) != Some(&'"') {
        return None;
    }
    let mut i = start + 1;
    let mut content = String::new();
    while i < chars.len() {
        if chars[i] == '"' {
            return Some((content, i + 1));
        }
        content.push(chars[i]);
        i += 1;
    }
    None
}

/// Title-cases a key: underscores become spaces and every word's first
/// letter is uppercased.
fn title_case(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes paired double quotes around quote-free runs; lone quotes are
/// kept.
fn strip_residual_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '"'
            && let Some((inner, end)) = read_quoted(&chars, i)
            && !inner.is_empty()
        {
            out.push_str(&inner);
            i = end;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Collapses three or more consecutive newlines down to one blank line.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push('\n');
            }
        } else {
            newlines = 0;
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_passes_through() {
        assert_eq!(clean_text("Plain sentence."), "Plain sentence.");
    }

    #[test]
    fn literal_escapes_are_unescaped() {
        assert_eq!(clean_text("line one\\nline two"), "line one\nline two");
    }

    #[test]
    fn code_fences_are_stripped() {
        let raw = "```json\nkept content\n```";
        assert_eq!(clean_text(raw), "kept content");
    }

    #[test]
    fn heading_lines_are_dropped() {
        let raw = "### Portfolio Manager Decision\nThe decision stands.";
        assert_eq!(clean_text(raw), "The decision stands.");
    }

    #[test]
    fn hash_without_space_is_not_a_heading() {
        assert_eq!(clean_text("#hashtag stays"), "#hashtag stays");
    }

    #[test]
    fn text_labels_are_removed() {
        assert_eq!(clean_text("Text: actual content"), "actual content");
    }

    #[test]
    fn standalone_brace_lines_are_dropped() {
        let raw = "{\nvalue line\n}";
        assert_eq!(clean_text(raw), "value line");
    }

    #[test]
    fn inline_pairs_become_readable_labels() {
        let raw = r#""risk_level": "moderate""#;
        assert_eq!(clean_text(raw), "Risk Level: moderate");
    }

    #[test]
    fn residual_quotes_are_stripped_in_pairs() {
        assert_eq!(clean_text(r#"rated "strong buy" today"#), "rated strong buy today");
    }

    #[test]
    fn lone_quote_survives() {
        assert_eq!(clean_text(r#"a lone " quote"#), r#"a lone " quote"#);
    }

    #[test]
    fn blank_line_runs_collapse() {
        let raw = "first\n\n\n\n\nsecond";
        assert_eq!(clean_text(raw), "first\n\nsecond");
    }

    #[test]
    fn never_panics_on_odd_input() {
        clean_text("\"unterminated");
        clean_text("\\n\\\"\\\\");
        clean_text("");
    }
}
