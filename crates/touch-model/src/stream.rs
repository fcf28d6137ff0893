//! JSONL encoding of touch event streams.
//!
//! One [`TouchEvent`] JSON object per line. Blank lines and lines starting
//! with `#` (headers, comments) are skipped.

use tactile_common::error::{TactileError, TactileResult};

use crate::touch::TouchEvent;

/// Parse touch events from JSONL content.
///
/// Errors carry the 1-based line number of the offending line.
pub fn parse_touch_events(jsonl: &str) -> TactileResult<Vec<TouchEvent>> {
    jsonl
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|e| {
                TactileError::invalid_touch_event(format!("line {line_no}: {e}"))
            })
        })
        .collect()
}

/// Parse a single JSONL line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_touch_line(line: &str) -> TactileResult<Option<TouchEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Serialize touch events to JSONL format.
pub fn serialize_touch_events(events: &[TouchEvent]) -> TactileResult<String> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
