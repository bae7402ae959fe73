//! KST Timestamps
//!
//! All commitment timestamps are Korea Standard Time (UTC+9) rendered as
//! ISO-8601 with an explicit `+09:00` offset. The fractional part is written
//! with microsecond precision and omitted entirely when it is zero, matching
//! the timestamps already published by earlier draws.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// KST offset from UTC in seconds.
pub const KST_OFFSET_SECS: i32 = 9 * 3600;

/// The UTC+9 offset.
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

/// Current wall-clock time in KST.
pub fn now_kst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

/// Render a timestamp in commitment format.
///
/// `2025-01-15T10:30:00.123456+09:00`, or `2025-01-15T10:30:00+09:00` when
/// the microsecond component is zero. Sub-microsecond digits are truncated.
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    // Leap seconds carry nanos >= 1e9; fold them back into the second.
    let micros = (at.nanosecond() % 1_000_000_000) / 1_000;
    if micros == 0 {
        at.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        format!(
            "{}.{:06}{}",
            at.format("%Y-%m-%dT%H:%M:%S"),
            micros,
            at.format("%:z")
        )
    }
}

/// Parse a commitment timestamp, if it is well-formed ISO-8601.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}

/// Human-readable KST rendering for console output.
///
/// Falls back to the raw string when it does not parse; revealed timestamps
/// are hashed verbatim and never rewritten.
pub fn display_kst(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(at) => at
            .with_timezone(&kst())
            .format("%Y-%m-%d %H:%M:%S KST")
            .to_string(),
        None => timestamp.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32, nanos: u32) -> DateTime<FixedOffset> {
        kst()
            .with_ymd_and_hms(2025, 1, 15, h, m, s)
            .unwrap()
            .with_nanosecond(nanos)
            .unwrap()
    }

    #[test]
    fn test_format_with_micros() {
        assert_eq!(
            format_timestamp(&at(10, 30, 0, 123_456_000)),
            "2025-01-15T10:30:00.123456+09:00"
        );
    }

    #[test]
    fn test_format_truncates_nanos() {
        assert_eq!(
            format_timestamp(&at(10, 30, 0, 1_999)),
            "2025-01-15T10:30:00.000001+09:00"
        );
    }

    #[test]
    fn test_format_omits_zero_fraction() {
        assert_eq!(format_timestamp(&at(10, 30, 0, 0)), "2025-01-15T10:30:00+09:00");
        // Below one microsecond also counts as zero
        assert_eq!(format_timestamp(&at(10, 30, 0, 999)), "2025-01-15T10:30:00+09:00");
    }

    #[test]
    fn test_now_is_kst() {
        let rendered = format_timestamp(&now_kst());
        assert!(rendered.ends_with("+09:00"), "{}", rendered);
    }

    #[test]
    fn test_parse_and_display() {
        let parsed = parse_timestamp("2025-01-15T10:30:00.000000+09:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), KST_OFFSET_SECS);

        assert_eq!(
            display_kst("2025-01-15T01:30:00+00:00"),
            "2025-01-15 10:30:00 KST"
        );
        assert_eq!(display_kst("not a time"), "not a time");
    }
}
