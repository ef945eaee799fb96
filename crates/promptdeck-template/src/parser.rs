//! Placeholder parsing.
//!
//! A placeholder is a run of one or more characters other than `(` and `)`
//! wrapped in a single pair of round brackets, e.g. `(subject)`. Nested
//! markers are not supported: in `(a(b)c)` only `(b)` is a placeholder and
//! the surrounding brackets stay literal. [`lint`] reports such input so
//! callers can surface it instead of silently accepting it.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::template::Segment;

static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^()]+)\)").expect("placeholder pattern is valid"));

/// Output of [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTemplate {
    /// Literal and placeholder segments in source order. Never contains an
    /// empty literal.
    pub structure: Vec<Segment>,
    /// Distinct placeholder keys in first-occurrence order.
    pub keys: Vec<String>,
}

impl ParsedTemplate {
    /// Rebuild the bracketed source text.
    pub fn to_raw(&self) -> String {
        to_raw(&self.structure)
    }
}

/// Split raw text into literal segments and placeholders.
///
/// Total: any input, including the empty string, yields a result.
pub fn parse(raw: &str) -> ParsedTemplate {
    let mut parsed = ParsedTemplate::default();
    let mut last = 0;

    for cap in PLACEHOLDER_PATTERN.captures_iter(raw) {
        let (Some(whole), Some(key)) = (cap.get(0), cap.get(1)) else {
            continue;
        };

        if whole.start() > last {
            parsed
                .structure
                .push(Segment::literal(&raw[last..whole.start()]));
        }

        let key = key.as_str();
        parsed.structure.push(Segment::placeholder(key));
        if !parsed.keys.iter().any(|k| k == key) {
            parsed.keys.push(key.to_string());
        }

        last = whole.end();
    }

    if last < raw.len() {
        parsed.structure.push(Segment::literal(&raw[last..]));
    }

    parsed
}

/// Join segments back into bracketed text.
pub fn to_raw(structure: &[Segment]) -> String {
    let mut out = String::new();
    for segment in structure {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder { key } => {
                out.push('(');
                out.push_str(key);
                out.push(')');
            }
        }
    }
    out
}

/// Keep previous defaults for keys still present; new keys default to `""`.
///
/// Keys no longer in `keys` are dropped.
pub fn reconcile_defaults(
    previous: &BTreeMap<String, String>,
    keys: &[String],
) -> BTreeMap<String, String> {
    keys.iter()
        .map(|key| {
            let value = previous.get(key).cloned().unwrap_or_default();
            (key.clone(), value)
        })
        .collect()
}

/// A suspicious bracket in template text. Offsets are byte positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerWarning {
    /// `(` inside an open marker.
    Nested { offset: usize },
    /// `()` with nothing between.
    Empty { offset: usize },
    /// `)` with no matching `(`.
    UnmatchedClose { offset: usize },
    /// `(` that is never closed.
    Unclosed { offset: usize },
}

impl MarkerWarning {
    pub fn offset(&self) -> usize {
        match *self {
            Self::Nested { offset }
            | Self::Empty { offset }
            | Self::UnmatchedClose { offset }
            | Self::Unclosed { offset } => offset,
        }
    }
}

impl fmt::Display for MarkerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nested { offset } => {
                write!(f, "nested '(' at byte {offset}; nested placeholders are not supported")
            }
            Self::Empty { offset } => write!(f, "empty placeholder '()' at byte {offset}"),
            Self::UnmatchedClose { offset } => write!(f, "unmatched ')' at byte {offset}"),
            Self::Unclosed { offset } => write!(f, "unclosed '(' at byte {offset}"),
        }
    }
}

/// Report brackets that [`parse`] will treat as literal text.
pub fn lint(raw: &str) -> Vec<MarkerWarning> {
    let mut warnings = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    for (offset, ch) in raw.char_indices() {
        match ch {
            '(' => {
                if !open.is_empty() {
                    warnings.push(MarkerWarning::Nested { offset });
                }
                open.push(offset);
            }
            ')' => match open.pop() {
                Some(start) if start + 1 == offset => {
                    warnings.push(MarkerWarning::Empty { offset: start });
                }
                Some(_) => {}
                None => warnings.push(MarkerWarning::UnmatchedClose { offset }),
            },
            _ => {}
        }
    }

    warnings.extend(open.into_iter().map(|offset| MarkerWarning::Unclosed { offset }));
    warnings.sort_by_key(MarkerWarning::offset);
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn lit(s: &str) -> Segment {
        Segment::literal(s)
    }

    fn key(s: &str) -> Segment {
        Segment::placeholder(s)
    }

    #[test]
    fn test_parse_mixed_text() {
        let parsed = parse("Hello (name), welcome to (place)!");
        assert_eq!(
            parsed.structure,
            vec![lit("Hello "), key("name"), lit(", welcome to "), key("place"), lit("!")]
        );
        assert_eq!(parsed.keys, vec!["name", "place"]);
    }

    #[test]
    fn test_parse_repeated_key_listed_once() {
        let parsed = parse("(a) and (a)");
        assert_eq!(parsed.structure, vec![key("a"), lit(" and "), key("a")]);
        assert_eq!(parsed.keys, vec!["a"]);
    }

    #[test]
    fn test_parse_empty_input() {
        let parsed = parse("");
        assert!(parsed.structure.is_empty());
        assert!(parsed.keys.is_empty());
    }

    #[test_case("no markers here", &["no markers here"]; "plain text")]
    #[test_case("()", &["()"]; "empty brackets stay literal")]
    #[test_case("open ( only", &["open ( only"]; "unclosed marker")]
    #[test_case("close ) only", &["close ) only"]; "unmatched close")]
    fn test_parse_literal_only(raw: &str, expected: &[&str]) {
        let parsed = parse(raw);
        let expected: Vec<Segment> = expected.iter().map(|s| lit(s)).collect();
        assert_eq!(parsed.structure, expected);
        assert!(parsed.keys.is_empty());
    }

    #[test]
    fn test_parse_adjacent_placeholders_have_no_empty_literal() {
        let parsed = parse("(a)(b)");
        assert_eq!(parsed.structure, vec![key("a"), key("b")]);
    }

    #[test]
    fn test_parse_nested_marker_uses_innermost() {
        let parsed = parse("(a(b)c)");
        assert_eq!(parsed.structure, vec![lit("(a"), key("b"), lit("c)")]);
        assert_eq!(parsed.keys, vec!["b"]);
    }

    #[test]
    fn test_parse_keeps_key_whitespace() {
        let parsed = parse("( spaced key )");
        assert_eq!(parsed.keys, vec![" spaced key "]);
    }

    #[test]
    fn test_parse_multibyte_text() {
        let parsed = parse("عکس (موضوع) در شب");
        assert_eq!(parsed.structure, vec![lit("عکس "), key("موضوع"), lit(" در شب")]);
    }

    #[test]
    fn test_reconcile_defaults_keeps_drops_and_adds() {
        let previous: BTreeMap<String, String> = [
            ("kept".to_string(), "value".to_string()),
            ("gone".to_string(), "old".to_string()),
        ]
        .into_iter()
        .collect();

        let keys = vec!["kept".to_string(), "fresh".to_string()];
        let reconciled = reconcile_defaults(&previous, &keys);

        assert_eq!(reconciled.len(), 2);
        assert_eq!(reconciled["kept"], "value");
        assert_eq!(reconciled["fresh"], "");
        assert!(!reconciled.contains_key("gone"));
    }

    #[test]
    fn test_lint_clean_text() {
        assert!(lint("A (b) and (c)").is_empty());
    }

    #[test_case("(a(b)c)", MarkerWarning::Nested { offset: 2 }; "nested")]
    #[test_case("x () y", MarkerWarning::Empty { offset: 2 }; "empty")]
    #[test_case("x ) y", MarkerWarning::UnmatchedClose { offset: 2 }; "unmatched close")]
    #[test_case("x (y", MarkerWarning::Unclosed { offset: 2 }; "unclosed")]
    fn test_lint_reports(raw: &str, expected: MarkerWarning) {
        assert_eq!(lint(raw), vec![expected]);
    }

    #[test]
    fn test_lint_warnings_sorted_by_offset() {
        let warnings = lint("(open ) extra)");
        assert_eq!(warnings, vec![MarkerWarning::UnmatchedClose { offset: 13 }]);

        let warnings = lint("((x)");
        assert_eq!(
            warnings,
            vec![MarkerWarning::Unclosed { offset: 0 }, MarkerWarning::Nested { offset: 1 }]
        );
    }

    #[test]
    fn test_warning_display_mentions_position() {
        let message = MarkerWarning::Nested { offset: 4 }.to_string();
        assert!(message.contains("byte 4"));
        assert!(message.contains("not supported"));
    }

    proptest! {
        #[test]
        fn prop_rewrapping_keys_reproduces_input(raw in "[a-z ()]{0,40}") {
            prop_assert_eq!(parse(&raw).to_raw(), raw);
        }

        #[test]
        fn prop_no_empty_literals(raw in "[a-z ()]{0,40}") {
            let parsed = parse(&raw);
            prop_assert!(parsed.structure.iter().all(|s| !matches!(s, Segment::Literal(t) if t.is_empty())));
        }

        #[test]
        fn prop_keys_are_distinct_and_match_structure(raw in "[a-c ()]{0,40}") {
            let parsed = parse(&raw);
            let mut seen = Vec::new();
            for k in parsed.structure.iter().filter_map(Segment::key) {
                if !seen.iter().any(|s: &String| s == k) {
                    seen.push(k.to_string());
                }
            }
            prop_assert_eq!(parsed.keys, seen);
        }
    }
}
