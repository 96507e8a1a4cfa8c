//! Field normalizers: total functions from raw backup attributes to typed
//! values. Backup dumps write missing data three ways (absent attribute,
//! empty string, literal "null"), and free-text bodies leak into numeric
//! fields; every function here absorbs that and never errors.

use chrono::{DateTime, TimeZone, Utc};

/// Epoch-milliseconds attribute → UTC instant.
///
/// Absent, non-integer, or unrepresentable input falls back to the current
/// instant. That masks a bad timestamp as "now"; downstream ordering by
/// transaction_date is only as good as the backup's date attributes.
pub fn parse_epoch_millis(raw: Option<&str>) -> DateTime<Utc> {
    let Some(millis) = raw.and_then(|s| s.parse::<i64>().ok()) else {
        return Utc::now();
    };
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
}

/// "1" is the backup's only truthy read flag.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw == Some("1")
}

/// Nullable integer attribute, e.g. `sub_id`.
pub fn parse_optional_int(raw: Option<&str>) -> Option<i64> {
    match raw {
        None | Some("") | Some("null") => None,
        Some(s) => s.parse().ok(),
    }
}

/// Nullable text attribute, e.g. `subject`.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    match raw {
        None | Some("") | Some("null") => None,
        Some(s) => Some(s.to_string()),
    }
}

/// Contact name; the backup writes "(Unknown)" for numbers not in the
/// phone book, which is absence, not a name.
pub fn known_contact(raw: Option<&str>) -> Option<String> {
    match raw {
        None | Some("(Unknown)") => None,
        Some(s) => Some(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_millis_known_instant() {
        let parsed = parse_epoch_millis(Some("1715351458724"));
        assert_eq!(parsed, Utc.timestamp_millis_opt(1715351458724).unwrap());
        assert_eq!(parsed.to_rfc3339(), "2024-05-10T14:30:58.724+00:00");
    }

    #[test]
    fn test_epoch_millis_fallback_is_now() {
        for raw in [None, Some("not-a-number"), Some("")] {
            let before = Utc::now();
            let parsed = parse_epoch_millis(raw);
            let after = Utc::now();
            assert!(parsed >= before && parsed <= after);
        }
    }

    #[test]
    fn test_flag() {
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("true")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_optional_int() {
        assert_eq!(parse_optional_int(Some("6")), Some(6));
        assert_eq!(parse_optional_int(Some("null")), None);
        assert_eq!(parse_optional_int(Some("")), None);
        assert_eq!(parse_optional_int(Some("6b")), None);
        assert_eq!(parse_optional_int(None), None);
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("hello")), Some("hello".to_string()));
        assert_eq!(optional_text(Some("null")), None);
        assert_eq!(optional_text(Some("")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_known_contact() {
        assert_eq!(known_contact(Some("Jane Smith")), Some("Jane Smith".to_string()));
        assert_eq!(known_contact(Some("(Unknown)")), None);
        assert_eq!(known_contact(None), None);
    }
}
