//! Subscriber identifier formatting
//!
//! The portal identifies a subscriber by the same number in two textual
//! forms: a local form with a leading `0` and an international form with the
//! `94` country prefix. The API requires the international form; the UI shows
//! the local form.

use tracing::warn;

/// Normalize a subscriber id to the international (`94`-prefixed) form.
///
/// Unrecognized leading patterns are passed through unchanged after a
/// warning; the portal occasionally hands out identifiers in formats this
/// tool has never seen, and rejecting them would be worse than forwarding
/// them as-is.
pub fn normalize_subscriber_id(id: &str) -> String {
    if let Some(rest) = id.strip_prefix('0') {
        format!("94{}", rest)
    } else if id.starts_with("94") {
        id.to_string()
    } else {
        warn!("Unexpected subscriberId format: {}", id);
        id.to_string()
    }
}

/// Format a subscriber id for display, converting the `94` prefix back to a
/// leading `0`. Anything else is returned unchanged.
pub fn format_account_id(account_id: &str) -> String {
    match account_id.strip_prefix("94") {
        Some(rest) => format!("0{}", rest),
        None => account_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_leading_zero() {
        assert_eq!(normalize_subscriber_id("0712345678"), "94712345678");
        assert_eq!(normalize_subscriber_id("0112055055"), "94112055055");
    }

    #[test]
    fn test_normalize_already_international() {
        assert_eq!(normalize_subscriber_id("94712345678"), "94712345678");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_subscriber_id("0712345678");
        assert_eq!(normalize_subscriber_id(&once), once);
    }

    #[test]
    fn test_normalize_unknown_prefix_passthrough() {
        assert_eq!(normalize_subscriber_id("12345"), "12345");
        assert_eq!(normalize_subscriber_id(""), "");
    }

    #[test]
    fn test_format_account_id() {
        assert_eq!(format_account_id("94712345678"), "0712345678");
        assert_eq!(format_account_id("0712345678"), "0712345678");
        assert_eq!(format_account_id("MockSubscriberId"), "MockSubscriberId");
    }

    #[test]
    fn test_round_trip() {
        for id in ["0712345678", "94712345678"] {
            let normalized = normalize_subscriber_id(id);
            let displayed = format_account_id(&normalized);
            assert_eq!(displayed, format_account_id(id));
        }
        // Local form survives a full round trip exactly
        assert_eq!(format_account_id(&normalize_subscriber_id("0712345678")), "0712345678");
    }
}
