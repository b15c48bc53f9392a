use std::sync::OnceLock;

use regex::Regex;

static FIELD_PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();

/// Patterns for the two fields a fiber fragment carries. Values may appear
/// quoted or bare, so the surrounding quotes are optional.
struct FieldPatterns {
    name: Regex,
    percentage: Regex,
}

impl FieldPatterns {
    fn new() -> Self {
        Self {
            name: Regex::new(r#""name"\s*:\s*"?([^"},]+)"?"#).expect("name regex must compile"),
            percentage: Regex::new(r#""percentage"\s*:\s*"?([^"},]+)"?"#)
                .expect("percentage regex must compile"),
        }
    }
}

fn patterns() -> &'static FieldPatterns {
    FIELD_PATTERNS.get_or_init(FieldPatterns::new)
}

/// Split `text` on commas that sit outside any `{...}` nesting and outside
/// double quotes. Pieces are trimmed; a trailing empty piece is not emitted.
///
/// Quotes toggle on every `"` since the format has no escapes.
pub(crate) fn split_top_level(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut depth: i32 = 0;
    let mut quoted = false;
    let mut current = String::new();

    for ch in text.chars() {
        if ch == '"' {
            quoted = !quoted;
        } else if !quoted {
            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                ',' if depth == 0 => {
                    pieces.push(current.trim().to_string());
                    current.clear();
                    continue;
                }
                _ => {}
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        pieces.push(current.trim().to_string());
    }
    pieces
}

/// Split a `key: value` fragment at its first colon outside quotes and
/// braces. Returns `None` when there is no such colon.
pub(crate) fn split_key_value(fragment: &str) -> Option<(&str, &str)> {
    let mut depth: i32 = 0;
    let mut quoted = false;

    for (index, ch) in fragment.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            '{' if !quoted => depth += 1,
            '}' if !quoted => depth -= 1,
            ':' if !quoted && depth == 0 => {
                return Some((&fragment[..index], &fragment[index + 1..]));
            }
            _ => {}
        }
    }
    None
}

/// Strip surrounding whitespace and every double quote.
pub(crate) fn clean(text: &str) -> String {
    text.trim().replace('"', "")
}

/// Remove one pair of enclosing delimiters if present, after trimming.
pub(crate) fn unwrap_delimited(text: &str, open: char, close: char) -> Option<&str> {
    text.trim().strip_prefix(open)?.strip_suffix(close)
}

/// Drop a leading `{` and, if present, the matching trailing `}`. A file cut
/// off mid-write still yields its complete leading blocks this way.
pub(crate) fn strip_braces(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('{')
        .map(|rest| rest.strip_suffix('}').unwrap_or(rest))
        .unwrap_or(text)
}

pub(crate) fn extract_name(fragment: &str) -> Option<String> {
    extract(&patterns().name, fragment)
}

pub(crate) fn extract_percentage(fragment: &str) -> Option<String> {
    extract(&patterns().percentage, fragment)
}

fn extract(pattern: &Regex, fragment: &str) -> Option<String> {
    pattern
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ignores_commas_inside_braces() {
        let pieces = split_top_level(r#""a": { "x": 1, "y": 2 }, "b": { "z": 3 }"#);
        assert_eq!(pieces, [r#""a": { "x": 1, "y": 2 }"#, r#""b": { "z": 3 }"#]);
    }

    #[test]
    fn split_ignores_commas_and_braces_inside_quotes() {
        let pieces = split_top_level(r#""a, {b": 1, "c}": 2"#);
        assert_eq!(pieces, [r#""a, {b": 1"#, r#""c}": 2"#]);
    }

    #[test]
    fn split_keeps_empty_middle_pieces_but_drops_empty_tail() {
        assert_eq!(split_top_level("a,,b"), ["a", "", "b"]);
        assert_eq!(split_top_level("a,"), ["a"]);
        assert!(split_top_level("").is_empty());
    }

    #[test]
    fn key_value_split_skips_quoted_colons() {
        let (key, value) = split_key_value(r#""Mix: 50/50": { "f0": {} }"#).unwrap();
        assert_eq!(key, r#""Mix: 50/50""#);
        assert_eq!(value.trim(), r#"{ "f0": {} }"#);
        assert!(split_key_value("no colon here").is_none());
    }

    #[test]
    fn extracts_quoted_and_bare_values() {
        let fragment = r#"{ "name": "Merino", "percentage": 62.50 }"#;
        assert_eq!(extract_name(fragment).as_deref(), Some("Merino"));
        assert_eq!(extract_percentage(fragment).as_deref(), Some("62.50"));

        let quoted = r#"{ "percentage": "40", "name":Silk }"#;
        assert_eq!(extract_name(quoted).as_deref(), Some("Silk"));
        assert_eq!(extract_percentage(quoted).as_deref(), Some("40"));
    }

    #[test]
    fn missing_field_extracts_nothing() {
        assert_eq!(extract_name(r#"{ "percentage": 10 }"#), None);
        assert_eq!(extract_percentage(r#"{ "name": "Silk" }"#), None);
    }

    #[test]
    fn strip_braces_tolerates_missing_close() {
        assert_eq!(strip_braces(" { a } "), " a ");
        assert_eq!(strip_braces("{ a"), " a");
        assert_eq!(strip_braces("a }"), "a }");
    }

    #[test]
    fn unwrap_requires_both_delimiters() {
        assert_eq!(unwrap_delimited("  [a]  ", '[', ']'), Some("a"));
        assert_eq!(unwrap_delimited("[a", '[', ']'), None);
    }
}
