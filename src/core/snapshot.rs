//! Snapshot encoding for limiter state persistence
//!
//! The persisted form is a JSON object mapping each key to its ordered array
//! of i64 nanosecond admission timestamps:
//!
//! ```json
//! {"orders-api": [1012345678901, 1012345680001], "search-api": []}
//! ```
//!
//! The shape is decoded explicitly into a string-to-integer-list map rather
//! than through a generic object-graph serializer, so anything else — a
//! top-level array, non-integer timestamps, truncated input — is rejected as
//! a whole and never partially applied. A `BTreeMap` keeps the encoded output
//! deterministic.

use super::ThrottleError;
use std::collections::BTreeMap;

/// Every key's ordered timestamp history, as captured or restored
pub(crate) type SnapshotView = BTreeMap<String, Vec<i64>>;

pub(crate) fn encode(view: &SnapshotView) -> Result<String, ThrottleError> {
    serde_json::to_string(view).map_err(|e| ThrottleError::MalformedSnapshot(e.to_string()))
}

/// Parse a snapshot string; `Ok(None)` means "nothing to restore"
///
/// Empty (or all-whitespace) input and the JSON `null` literal are treated as
/// absent snapshots, matching what an external store hands back when nothing
/// was ever persisted.
pub(crate) fn decode(snapshot: &str) -> Result<Option<SnapshotView>, ThrottleError> {
    let trimmed = snapshot.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| ThrottleError::MalformedSnapshot(e.to_string()))
}
