use chrono::{DateTime, Local, NaiveDate};
use log::warn;

use crate::config::DATE_PLACEHOLDER;

/// Whether a validity date lies strictly before today.
///
/// The expiration is taken as the end of its calendar day and `now` as
/// the start of the current day, so a date equal to today never expires.
/// Blank fields and the form's untouched `dd/mm/aaaa` placeholder never
/// expire either. Unparseable text is logged and treated as not expired:
/// bad data must not hide a slide.
pub fn is_expired(date_text: &str, now: DateTime<Local>) -> bool {
    let text = date_text.trim();
    if text.is_empty() || text == DATE_PLACEHOLDER {
        return false;
    }

    let Some(expiration) = parse_date(text) else {
        warn!("unparseable validity date '{text}', keeping slot visible");
        return false;
    };

    // End-of-day(expiration) < start-of-day(now) collapses to a plain
    // date comparison.
    expiration < now.date_naive()
}

/// `DD/MM/YYYY` when slash-delimited (the platform's calendar widget),
/// ISO `YYYY-MM-DD` otherwise, with RFC 3339 date-times accepted as a
/// fallback.
fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.contains('/') {
        NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
    } else {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_blank_and_placeholder_never_expire() {
        let now = at(2024, 1, 1);
        assert!(!is_expired("", now));
        assert!(!is_expired("   ", now));
        assert!(!is_expired("dd/mm/aaaa", now));
    }

    #[test]
    fn test_future_date_not_expired() {
        assert!(!is_expired("31/12/2099", at(2024, 1, 1)));
        assert!(!is_expired("2099-12-31", at(2024, 1, 1)));
    }

    #[test]
    fn test_past_date_expired() {
        assert!(is_expired("01/01/2000", at(2024, 1, 1)));
        assert!(is_expired("2000-01-01", at(2024, 1, 1)));
    }

    #[test]
    fn test_same_day_not_expired() {
        assert!(!is_expired("15/06/2024", at(2024, 6, 15)));
        assert!(!is_expired("2024-06-15", at(2024, 6, 15)));
    }

    #[test]
    fn test_yesterday_expired() {
        assert!(is_expired("14/06/2024", at(2024, 6, 15)));
    }

    #[test]
    fn test_fail_open_on_garbage() {
        let now = at(2024, 1, 1);
        assert!(!is_expired("not-a-date", now));
        assert!(!is_expired("99/99/9999", now));
        assert!(!is_expired("2024-13-45", now));
    }

    #[test]
    fn test_rfc3339_datetime_accepted() {
        assert!(is_expired("2000-01-01T10:30:00Z", at(2024, 1, 1)));
    }
}
