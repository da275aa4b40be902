//! JSON compaction.

use crate::error::Result;

/// Parse `source` strictly as JSON and re-serialize it with no whitespace.
///
/// Object member order is preserved. Idempotent on already-compact input.
/// A parse failure propagates the parser's own message.
pub fn compact(source: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    Ok(serde_json::to_string(&value)?)
}
