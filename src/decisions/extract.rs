//! Best-effort recovery of structured decisions from free text.
//!
//! Providers are asked to answer with a JSON object but routinely wrap it in
//! prose or code fences. Extraction tries, in order:
//!
//! 1. the whole text as a JSON object
//! 2. the first fenced code block labelled `json`
//! 3. the first unlabelled fenced code block
//! 4. the first balanced `{...}` span
//!
//! The first candidate that parses to a JSON object wins. Nothing here
//! returns an error: unusable input is `Decision::Absent`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::Decision;

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_+-]*)[ \t]*\r?\n?(.*?)```").expect("fence pattern is valid")
});

/// A JSON object recovered from a response.
pub type DecisionObject = Map<String, Value>;

#[derive(Clone, Copy, Debug, Default)]
pub struct DecisionExtractor;

impl DecisionExtractor {
    /// Recover the first JSON object from `raw`.
    ///
    /// ```
    /// use werewolf_engine::decisions::{Decision, DecisionExtractor};
    ///
    /// let raw = "I think Cao Cao is lying.\n```json\n{\"vote\": \"Cao Cao\"}\n```";
    /// let Decision::Made(obj) = DecisionExtractor::extract(raw) else { panic!() };
    /// assert_eq!(obj["vote"], "Cao Cao");
    ///
    /// assert!(DecisionExtractor::extract("no idea").is_absent());
    /// ```
    #[must_use]
    pub fn extract(raw: &str) -> Decision<DecisionObject> {
        let text = raw.trim();
        if text.is_empty() {
            return Decision::Absent;
        }

        if let Some(obj) = parse_object(text) {
            return Decision::Made(obj);
        }

        let fences: Vec<(&str, &str)> = FENCE
            .captures_iter(text)
            .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
            .collect();

        let labelled = fences
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case("json"));
        if let Some(obj) = labelled.and_then(|(_, body)| parse_object(body)) {
            return Decision::Made(obj);
        }

        let unlabelled = fences.iter().find(|(label, _)| label.is_empty());
        if let Some(obj) = unlabelled.and_then(|(_, body)| parse_object(body)) {
            return Decision::Made(obj);
        }

        if let Some(obj) = first_balanced_object(text).and_then(parse_object) {
            return Decision::Made(obj);
        }

        Decision::Absent
    }

    /// Recover an object and deserialize it into a typed choice.
    ///
    /// An object that does not fit `T` is `Absent`.
    #[must_use]
    pub fn extract_as<T: DeserializeOwned>(raw: &str) -> Decision<T> {
        Self::extract(raw)
            .and_then(|obj| Decision::from(serde_json::from_value::<T>(Value::Object(obj)).ok()))
    }

    /// Recover a spoken statement.
    ///
    /// Uses the `statement` field when the response is a JSON object that
    /// carries one, otherwise the trimmed text itself.
    #[must_use]
    pub fn statement(raw: &str) -> Decision<String> {
        let text = raw.trim();
        if text.is_empty() {
            return Decision::Absent;
        }

        if let Decision::Made(obj) = Self::extract(text) {
            if let Some(Value::String(s)) = obj.get("statement") {
                let s = s.trim();
                return if s.is_empty() {
                    Decision::Absent
                } else {
                    Decision::Made(s.to_string())
                };
            }
        }

        Decision::Made(text.to_string())
    }
}

fn parse_object(candidate: &str) -> Option<DecisionObject> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

/// The span from the first `{` to its matching `}`, skipping braces inside
/// string literals.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn made(raw: &str) -> DecisionObject {
        match DecisionExtractor::extract(raw) {
            Decision::Made(obj) => obj,
            Decision::Absent => panic!("expected a decision from {raw:?}"),
        }
    }

    #[test]
    fn test_whole_text() {
        let obj = made(r#"  {"target": "Liu Bei"}  "#);
        assert_eq!(obj["target"], "Liu Bei");
    }

    #[test]
    fn test_labelled_fence_preferred_over_unlabelled() {
        let raw = "```\n{\"target\": \"A\"}\n```\nthen\n```json\n{\"target\": \"B\"}\n```";
        assert_eq!(made(raw)["target"], "B");
    }

    #[test]
    fn test_unlabelled_fence() {
        let raw = "Here you go:\n```\n{\"vote\": \"Zhao Yun\"}\n```";
        assert_eq!(made(raw)["vote"], "Zhao Yun");
    }

    #[test]
    fn test_uppercase_label() {
        let raw = "```JSON\n{\"shoot\": true}\n```";
        assert_eq!(made(raw)["shoot"], true);
    }

    #[test]
    fn test_broken_labelled_fence_falls_through() {
        let raw = "```json\n{not json}\n```\nActually:\n```\n{\"target\": \"Cao Cao\"}\n```";
        assert_eq!(made(raw)["target"], "Cao Cao");
    }

    #[test]
    fn test_balanced_span_ignores_braces_in_strings() {
        let raw = r#"My pick {"target": "Sun Quan", "reason": "he said }{ twice"} and that's final {"#;
        let obj = made(raw);
        assert_eq!(obj["target"], "Sun Quan");
        assert_eq!(obj["reason"], "he said }{ twice");
    }

    #[test]
    fn test_nested_object() {
        let raw = r#"ok {"use_poison": true, "meta": {"x": 1}} done"#;
        assert_eq!(made(raw)["meta"]["x"], 1);
    }

    #[test]
    fn test_absent_cases() {
        for raw in ["", "   ", "I pass.", "[1, 2, 3]", "42", "{unclosed", "```json\n```"] {
            assert!(DecisionExtractor::extract(raw).is_absent(), "{raw:?}");
        }
    }

    #[test]
    fn test_extract_as_typed() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Pick {
            target: String,
        }

        assert_eq!(
            DecisionExtractor::extract_as::<Pick>(r#"{"target": "A"}"#),
            Decision::Made(Pick { target: "A".into() })
        );
        assert!(DecisionExtractor::extract_as::<Pick>(r#"{"other": "A"}"#).is_absent());
    }

    #[test]
    fn test_statement() {
        assert_eq!(
            DecisionExtractor::statement("  I suspect Sima Yi.  "),
            Decision::Made("I suspect Sima Yi.".to_string())
        );
        assert_eq!(
            DecisionExtractor::statement(r#"{"statement": "Trust me."}"#),
            Decision::Made("Trust me.".to_string())
        );
        assert_eq!(
            DecisionExtractor::statement(r#"{"reach_agreement": true}"#),
            Decision::Made(r#"{"reach_agreement": true}"#.to_string())
        );
        assert!(DecisionExtractor::statement("\n").is_absent());
    }
}
