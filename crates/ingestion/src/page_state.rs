//! Embedded state extraction from the auction listing page.
//!
//! The page ships its initial state inside a `<script>` that assigns
//! `window.__NUXT__`. The JSON object is taken from the first `{` to the
//! last `}` of that script.

use riven_core::{Error, Result};
use serde_json::Value;

/// Marker identifying the state script.
pub const STATE_MARKER: &str = "window.__NUXT__";

/// Extract and parse the embedded state object from page HTML.
pub fn extract_page_state(html: &str) -> Result<Value> {
    let script = scripts(html)
        .find(|body| body.contains(STATE_MARKER))
        .ok_or_else(|| Error::extract("no script containing the page state"))?;

    let start = script
        .find('{')
        .ok_or_else(|| Error::extract("page state has no opening brace"))?;
    let end = script
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| Error::extract("page state has no closing brace"))?;

    Ok(serde_json::from_str(&script[start..=end])?)
}

/// Iterate over the bodies of `<script>` elements.
fn scripts(html: &str) -> impl Iterator<Item = &str> {
    let mut rest = html;
    std::iter::from_fn(move || loop {
        let open = find_ci(rest, "<script")?;
        let after_open = &rest[open..];
        let tag_end = after_open.find('>')?;
        let body_start = &after_open[tag_end + 1..];
        let Some(close) = find_ci(body_start, "</script") else {
            rest = "";
            return Some(body_start);
        };
        rest = &body_start[close..];
        let body = &body_start[..close];
        if !body.trim().is_empty() {
            return Some(body);
        }
    })
}

/// ASCII case-insensitive substring search.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
<script src="/app.js"></script>
<script>var analytics = {"id": 1};</script>
<SCRIPT type="text/javascript">window.__NUXT__ = {"state": {"auctions": [{"id": "a1", "item": {"item_type": "riven"}}]}};</SCRIPT>
</head><body></body></html>"#;

    #[test]
    fn test_extracts_state_script() {
        let state = extract_page_state(PAGE).unwrap();
        assert_eq!(state["state"]["auctions"][0]["id"], "a1");
    }

    #[test]
    fn test_missing_script() {
        let err = extract_page_state("<html><script>var x = {};</script></html>").unwrap_err();
        assert!(matches!(err, Error::Extract(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = extract_page_state("<script>window.__NUXT__ = {state: 1};</script>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_marker_without_object() {
        let err = extract_page_state("<script>window.__NUXT__ = null;</script>").unwrap_err();
        assert!(matches!(err, Error::Extract(_)));
    }

    #[test]
    fn test_unterminated_script() {
        let state = extract_page_state(r#"<script>window.__NUXT__ = {"ok": true}"#).unwrap();
        assert_eq!(state["ok"], true);
    }

    #[test]
    fn test_state_feeds_payload_split() {
        let state = extract_page_state(PAGE).unwrap();
        let auctions = crate::payload::split_auctions(state).unwrap();
        assert_eq!(auctions.len(), 1);
    }
}
