//! Recovery of JSON payloads from free-form model replies.
//!
//! Models wrap their output in markdown fences, add prose around it, or
//! leave trailing commas. [`sanitize`] digs out the outermost array (or a
//! lone object) and parses it, retrying once after a narrow repair.

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::LazyLock;

/// A whole string literal, or a comma directly before a closing bracket.
///
/// Matching string literals first means commas inside them are never touched.
static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"(?:[^"\\]|\\.)*"|,\s*([}\]])"#).expect("trailing comma pattern compiles")
});

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("no JSON array or object found in the model response")]
    NoJsonFound,

    #[error("model response is not valid JSON: {0}")]
    JsonParse(String),
}

/// Extract the candidate records from a raw stage-2 reply.
///
/// A bare object comes back as a one-element vector.
///
/// ```
/// use finder_pipeline::sanitize::sanitize;
/// use serde_json::json;
///
/// let items = sanitize("```json\n[{\"a\":1},]\n```").unwrap();
/// assert_eq!(items, vec![json!({"a": 1})]);
/// ```
pub fn sanitize(raw: &str) -> Result<Vec<Value>, SanitizeError> {
    let text = strip_code_fence(raw);
    let payload = locate_payload(text).ok_or(SanitizeError::NoJsonFound)?;

    match parse_with_repair(&payload)? {
        Value::Array(items) => Ok(items),
        other => Ok(vec![other]),
    }
}

/// Pull a single JSON object out of a reply (stage-1 intent replies).
///
/// Returns `None` for anything that is not a parseable object.
pub fn extract_object(raw: &str) -> Option<Map<String, Value>> {
    let text = strip_code_fence(raw);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Drop a leading ```` ``` ```` fence line (with any language tag) and a trailing fence.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let Some(after_fence) = text.strip_prefix("```") else {
        return text;
    };
    let body = match after_fence.find('\n') {
        Some(newline) => &after_fence[newline + 1..],
        None => after_fence,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn locate_payload(text: &str) -> Option<Cow<'_, str>> {
    if let Some(slice) = enclosed(text, '[', ']') {
        return Some(Cow::Borrowed(slice));
    }
    enclosed(text, '{', '}').map(|object| Cow::Owned(format!("[{object}]")))
}

fn enclosed(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn parse_with_repair(payload: &str) -> Result<Value, SanitizeError> {
    match serde_json::from_str(payload) {
        Ok(v) => Ok(v),
        Err(first) => {
            let repaired = TRAILING_COMMA.replace_all(payload, |caps: &Captures| match caps.get(1) {
                Some(close) => close.as_str().to_string(),
                None => caps[0].to_string(),
            });
            tracing::debug!(error = %first, "sanitize.retry_after_repair");
            serde_json::from_str(&repaired).map_err(|e| SanitizeError::JsonParse(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_array_with_trailing_comma_is_repaired() {
        let got = sanitize("```json\n[{\"a\":1},]\n```").unwrap();
        assert_eq!(got, vec![json!({"a": 1})]);
    }

    #[test]
    fn prose_around_the_array_is_ignored() {
        let raw = "Here you go:\n[{\"a\": 1}, {\"a\": 2}]\nGood luck!";
        assert_eq!(sanitize(raw).unwrap().len(), 2);
    }

    #[test]
    fn lone_object_is_wrapped() {
        let got = sanitize("Sure! {\"url\": \"x\", \"topic\": \"y\",}").unwrap();
        assert_eq!(got, vec![json!({"url": "x", "topic": "y"})]);
    }

    #[test]
    fn fence_without_newline_is_stripped() {
        assert_eq!(strip_code_fence("```[1]```"), "[1]");
        assert_eq!(strip_code_fence("  plain  "), "plain");
    }

    #[test]
    fn nested_trailing_commas_are_all_removed() {
        let raw = "[{\"tags\": [\"a\", \"b\",], \"n\": 1,},\n]";
        assert_eq!(sanitize(raw).unwrap(), vec![json!({"tags": ["a", "b"], "n": 1})]);
    }

    #[test]
    fn commas_inside_strings_survive_the_repair() {
        let got = sanitize(r#"[{"topic": "Arrays, ]", "note": "say \"hi,}\"", "n": 1,}]"#).unwrap();
        assert_eq!(got, vec![json!({"topic": "Arrays, ]", "note": "say \"hi,}\"", "n": 1})]);
    }

    #[test]
    fn no_brackets_means_no_json() {
        assert_eq!(sanitize("I cannot help with that."), Err(SanitizeError::NoJsonFound));
        assert_eq!(sanitize("] backwards ["), Err(SanitizeError::NoJsonFound));
    }

    #[test]
    fn unrecoverable_payload_is_a_parse_error() {
        assert!(matches!(
            sanitize("[{\"a\": 1 \"b\": 2}]"),
            Err(SanitizeError::JsonParse(_))
        ));
    }

    #[test]
    fn object_extraction_tolerates_fences_and_prose() {
        let map = extract_object("```json\n{\"company\": \"Google\", \"summary\": \"graphs\"}\n```").unwrap();
        assert_eq!(map["company"], "Google");
        assert!(extract_object("not json").is_none());
        assert!(extract_object("[1, 2]").is_none());
        assert!(extract_object("{broken").is_none());
    }
}
