//! Date-string handling for observation records.
//!
//! Observation dates are stored as `YYYYMMDD` strings and statistics are
//! keyed by the `YYYY` prefix. Some source files carry the date field as a
//! bare integer, so leading zeros may be missing.

/// Length of a full observation date (`YYYYMMDD`).
pub const DAY_LEN: usize = 8;

/// Length of a statistic year (`YYYY`).
pub const YEAR_LEN: usize = 4;

/// Normalize a raw date field to the 8-character zero-padded form.
///
/// Accepts 1 to 8 ASCII digits and left-pads with zeros. Returns `None`
/// for anything else (empty, too long, or containing non-digits).
pub fn normalize_day(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.len() > DAY_LEN {
        return None;
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{:0>width$}", raw, width = DAY_LEN))
}

/// The `YYYY` prefix of a normalized observation date.
pub fn year_of(day: &str) -> &str {
    &day[..YEAR_LEN.min(day.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_already_padded_dates() {
        assert_eq!(normalize_day("19850101").as_deref(), Some("19850101"));
    }

    #[test]
    fn pads_short_numeric_dates() {
        assert_eq!(normalize_day("850101").as_deref(), Some("00850101"));
        assert_eq!(normalize_day("1").as_deref(), Some("00000001"));
    }

    #[test]
    fn rejects_non_numeric_dates() {
        assert_eq!(normalize_day("1985-01-01"), None);
        assert_eq!(normalize_day("19850101x"), None);
        assert_eq!(normalize_day(""), None);
    }

    #[test]
    fn rejects_overlong_dates() {
        assert_eq!(normalize_day("198501011"), None);
    }

    #[test]
    fn extracts_year_prefix() {
        assert_eq!(year_of("19850101"), "1985");
        assert_eq!(year_of("1985"), "1985");
    }
}
