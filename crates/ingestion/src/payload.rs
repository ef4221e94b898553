//! Splitting marketplace payloads into raw auctions.
//!
//! Accepted shapes:
//! - a bare array of auctions
//! - `{"payload": {"auctions": [...]}}` from the search API
//! - `{"state": {"auctions": [...]}}` from the listing page state
//! - `{"auctions": [...]}`

use riven_core::{Error, RawAuction, Result};
use serde_json::Value;

/// Envelope paths tried in order on an object payload.
const ENVELOPES: [&[&str]; 3] = [&["payload", "auctions"], &["state", "auctions"], &["auctions"]];

/// Split a payload into raw auctions.
///
/// An empty array is a normal, empty result. Any other shape, or an
/// array element that is not an object, is `Error::InvalidInput`.
pub fn split_auctions(payload: Value) -> Result<Vec<RawAuction>> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(Error::invalid_input(format!(
                    "auction {idx} is {}, expected an object",
                    kind(&other)
                ))),
            })
            .collect(),
        Value::Object(mut map) => {
            for path in ENVELOPES {
                if let Some(inner) = take_path(&mut map, path) {
                    return split_auctions(inner);
                }
            }
            Err(Error::invalid_input("object payload has no auctions list"))
        }
        other => Err(Error::invalid_input(format!(
            "payload is {}, expected an array of auctions",
            kind(&other)
        ))),
    }
}

/// Parse a JSON document and split it into raw auctions.
pub fn split_auctions_str(json: &str) -> Result<Vec<RawAuction>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::invalid_input(format!("payload is not JSON: {e}")))?;
    split_auctions(value)
}

fn take_path(map: &mut serde_json::Map<String, Value>, path: &[&str]) -> Option<Value> {
    let (first, rest) = path.split_first()?;
    if rest.is_empty() {
        return map.remove(*first);
    }
    match map.get_mut(*first) {
        Some(Value::Object(inner)) => take_path(inner, rest),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
