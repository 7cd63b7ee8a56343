use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d %b, %Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
];

/// Best-effort absolute date parse. Offsets are converted to UTC, naive values taken as UTC.
pub fn parse_loose(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(start_of_day)
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// `YYYY-MM-DDTHH:MM:SSZ`.
pub fn to_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        start_of_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn parses_rfc3339_with_offset_as_utc() {
        let dt = parse_loose("2025-03-04T01:30:00+05:30").unwrap();
        assert_eq!(to_timestamp(dt), "2025-03-03T20:00:00Z");
    }

    #[test]
    fn parses_rfc2822() {
        let dt = parse_loose("Tue, 4 Mar 2025 10:00:00 GMT").unwrap();
        assert_eq!(to_timestamp(dt), "2025-03-04T10:00:00Z");
    }

    #[test]
    fn parses_naive_datetime_as_utc() {
        let dt = parse_loose("2025-03-04T10:15:30.250").unwrap();
        assert_eq!(to_timestamp(dt), "2025-03-04T10:15:30Z");
    }

    #[test]
    fn parses_provider_style_dates() {
        assert_eq!(parse_loose("Nov 8, 2025"), Some(ymd(2025, 11, 8)));
        assert_eq!(parse_loose("November 8, 2025"), Some(ymd(2025, 11, 8)));
        assert_eq!(parse_loose("8 Nov 2025"), Some(ymd(2025, 11, 8)));
        assert_eq!(parse_loose("2025-11-08"), Some(ymd(2025, 11, 8)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_loose(""), None);
        assert_eq!(parse_loose("   "), None);
        assert_eq!(parse_loose("sometime last spring"), None);
    }

    #[test]
    fn timestamp_always_ends_in_z() {
        let ts = to_timestamp(ymd(2025, 1, 1));
        assert_eq!(ts, "2025-01-01T00:00:00Z");
    }
}
