// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! Documents store timestamps as RFC3339 strings with millisecond precision
//! and a `Z` suffix; the fixed fractional width keeps lexicographic order
//! equal to chronological order for store-side sorting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with milliseconds and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in the document timestamp format.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Parse a document timestamp back into a UTC instant.
pub fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_fixed_width_millis() {
        let date = Utc.with_ymd_and_hms(2026, 3, 2, 9, 5, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2026-03-02T09:05:00.000Z");
    }

    #[test]
    fn test_round_trip() {
        let date = Utc.with_ymd_and_hms(2026, 3, 2, 9, 5, 7).unwrap();
        let formatted = format_utc_rfc3339(date);
        assert_eq!(parse_rfc3339(&formatted), Some(date));
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        let earlier = Utc.with_ymd_and_hms(2026, 3, 2, 9, 5, 7).unwrap();
        let later = earlier + chrono::Duration::milliseconds(3);
        assert!(format_utc_rfc3339(earlier) < format_utc_rfc3339(later));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_rfc3339("not-a-date"), None);
    }
}
