//! Normalization helpers for turning an inbound request into a capture.

use chrono::{SecondsFormat, Utc};

/// Current UTC time at second precision, ISO-8601 with an explicit offset
/// (`2026-08-05T12:00:00+00:00`).
pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Best-effort parse of the raw body as JSON, returning the compact
/// re-serialized form. A body that does not parse, or parses to a bare
/// `null`, yields `None`; either way the capture itself proceeds.
pub fn parse_body_json(raw: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Null) => None,
        Ok(value) => Some(value.to_string()),
        Err(_) => None,
    }
}
