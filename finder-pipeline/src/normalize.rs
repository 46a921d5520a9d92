//! Canonicalization of model-produced problem links.
//!
//! [`normalize_url`] is total and idempotent: whatever comes in, an absolute
//! `http(s)://` address comes out, and feeding that back in with the same
//! hints returns it unchanged.

use url::form_urlencoded;

pub const DEFAULT_PLATFORM: &str = "LeetCode";
pub const DEFAULT_TOPIC: &str = "coding problem";

const SEARCH_ENDPOINT: &str = "https://www.google.com/search?q=";

/// Platform name fragments (lowercase) and the origin their relative links hang off.
const PLATFORM_ORIGINS: &[(&[&str], &str)] = &[
    (&["leetcode"], "https://leetcode.com"),
    (&["geeksforgeeks", "gfg"], "https://www.geeksforgeeks.org"),
    (&["hackerrank"], "https://www.hackerrank.com"),
    (&["interviewbit"], "https://www.interviewbit.com"),
    (&["codechef"], "https://www.codechef.com"),
];

/// Rewrite `url` into an absolute address, using `platform`/`topic` as hints.
///
/// ```
/// use finder_pipeline::normalize::normalize_url;
///
/// assert_eq!(
///     normalize_url("/problems/two-sum", "LeetCode", "Two Sum"),
///     "https://leetcode.com/problems/two-sum"
/// );
/// assert_eq!(
///     normalize_url("", "", ""),
///     "https://www.google.com/search?q=LeetCode+coding+problem"
/// );
/// ```
pub fn normalize_url(url: &str, platform: &str, topic: &str) -> String {
    let raw = url.trim();
    if raw.is_empty() {
        return search_url(platform, topic);
    }
    if has_web_scheme(raw) {
        return raw.to_string();
    }
    if let Some(rest) = raw.strip_prefix("//") {
        let host_and_path = rest.trim_start_matches('/');
        if host_and_path.is_empty() {
            return search_url(platform, topic);
        }
        return format!("https://{host_and_path}");
    }
    if let Some(path) = raw.strip_prefix('/') {
        if path.is_empty() {
            return search_url(platform, topic);
        }
        return match platform_origin(platform) {
            Some(origin) => format!("{origin}{raw}"),
            None => format!("https://{path}"),
        };
    }
    format!("https://{raw}")
}

/// Canonical origin for a platform display name, matched case-insensitively.
pub fn platform_origin(platform: &str) -> Option<&'static str> {
    let lowered = platform.to_lowercase();
    PLATFORM_ORIGINS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map(|(_, origin)| *origin)
}

fn has_web_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

fn search_url(platform: &str, topic: &str) -> String {
    let platform = non_blank(platform).unwrap_or(DEFAULT_PLATFORM);
    let topic = non_blank(topic).unwrap_or(DEFAULT_TOPIC);
    let terms = format!("{platform} {topic}");
    let encoded: String = form_urlencoded::byte_serialize(terms.as_bytes()).collect();
    format!("{SEARCH_ENDPOINT}{encoded}")
}

fn non_blank(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}
