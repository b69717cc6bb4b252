//! Directive encoding for hosts that exchange JSON.
//!
//! Field names are camelCase and an ended block carries `"component": null`,
//! which is the shape the hosting study framework reads back.

use crate::directive::Directive;

/// Single-line JSON, as returned by [`AdaptiveSession::compute_next_json`].
///
/// [`AdaptiveSession::compute_next_json`]: crate::AdaptiveSession::compute_next_json
pub fn to_json(directive: &Directive) -> Result<String, serde_json::Error> {
    serde_json::to_string(directive)
}

/// Indented JSON for logs and fixtures.
pub fn to_json_pretty(directive: &Directive) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(directive)
}
