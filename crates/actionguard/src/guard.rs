use serde_json::Value;

use crate::{
    error::{GuardError, GuardErrorKind},
    scanner::{inspect, Inspection},
    value::ValueTree,
};

/// Upper bound on a trimmed payload field, in characters.
///
/// Keeps the scanner's worst-case work bounded before any parsing cost is
/// paid.
pub const MAX_PAYLOAD_CHARS: usize = 30_000;

/// Validate and parse one raw text field into a payload tree.
///
/// `field` is the caller-supplied form field label (e.g. `"0"`) and only
/// shows up in error messages. The input is trimmed first; empty, oversized,
/// and malformed inputs fail with the matching [`GuardErrorKind`]. Parsing
/// is all-or-nothing and side-effect free.
pub fn parse_payload(raw: &str, field: &str) -> Result<ValueTree, GuardError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(GuardError::new(field, GuardErrorKind::EmptyInput));
    }

    // The limit is in characters, not bytes. Byte length bounds character
    // count from above, so only count when the cheap check is inconclusive.
    if trimmed.len() > MAX_PAYLOAD_CHARS && trimmed.chars().count() > MAX_PAYLOAD_CHARS {
        return Err(GuardError::new(field, GuardErrorKind::SizeLimitExceeded));
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Ok(ValueTree::from_json(&value)),
        // Parser diagnostics stay internal; the caller gets the generic
        // message only.
        Err(_) => Err(GuardError::new(field, GuardErrorKind::MalformedJson)),
    }
}

/// Guard then scan: the full pipeline for one submitted field.
///
/// A guard failure means the scan never runs; on success the verdict is
/// always well-formed, whatever the payload contains.
pub fn screen_payload(raw: &str, field: &str) -> Result<Inspection, GuardError> {
    let tree = parse_payload(raw, field)?;
    Ok(inspect(&tree))
}
