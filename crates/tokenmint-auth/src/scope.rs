//! Scope negotiation and checks.
//!
//! Scopes are space-separated permission strings. At issuance the
//! requested set is intersected with the server's allowed set; the
//! allowed set's order is the canonical output order, and unknown
//! scopes are dropped silently rather than rejected.

use std::collections::HashSet;

/// Negotiates the granted scope for a token request.
///
/// The requested scope is split on whitespace; when it is absent or
/// blank the default scope is used instead. The result is the
/// intersection with `allowed`, emitted in the order of `allowed`.
/// An empty result is legal when nothing overlaps.
#[must_use]
pub fn negotiate(requested: Option<&str>, allowed: &[String], default_scope: &str) -> String {
    let requested = match requested {
        Some(s) if !s.trim().is_empty() => s,
        _ => default_scope,
    };

    let requested: HashSet<&str> = requested.split_whitespace().collect();

    allowed
        .iter()
        .map(String::as_str)
        .filter(|s| requested.contains(s))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if a granted scope string contains the required scope.
#[must_use]
pub fn scope_contains(granted: &str, required: &str) -> bool {
    granted.split_whitespace().any(|s| s == required)
}
