use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use super::parse::parse_loose;

/// A count followed by a unit, in English or Hindi ("2 hours ago", "3 दिन पहले").
static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+|\ban?\b)\s*((?:minutes?|mins?|hours?|hrs?|days?|weeks?|months?)\b|मिनट|घंटे|घंटा|दिन|सप्ताह|हफ्ते|हफ्ता|महीना|महीने)",
    )
    .expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Minute,
    Hour,
    Day,
    Week,
    /// Fixed 30 days.
    Month,
}

impl Unit {
    fn from_word(word: &str) -> Option<Self> {
        let w = word.to_lowercase();
        if w.starts_with("mi") || w == "मिनट" {
            Some(Unit::Minute)
        } else if w.starts_with('h') || w.starts_with("घंट") {
            Some(Unit::Hour)
        } else if w.starts_with("day") || w == "दिन" {
            Some(Unit::Day)
        } else if w.starts_with("week") || w == "सप्ताह" || w.starts_with("हफ्") {
            Some(Unit::Week)
        } else if w.starts_with("month") || w.starts_with("मही") {
            Some(Unit::Month)
        } else {
            None
        }
    }

    fn times(self, n: i64) -> Option<Duration> {
        match self {
            Unit::Minute => Duration::try_minutes(n),
            Unit::Hour => Duration::try_hours(n),
            Unit::Day => Duration::try_days(n),
            Unit::Week => Duration::try_weeks(n),
            Unit::Month => n.checked_mul(30).and_then(Duration::try_days),
        }
    }
}

/// `now - N·unit` for a relative string; otherwise a loose absolute parse of the same string.
pub fn parse_relative(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let Some(caps) = RELATIVE_RE.captures(raw) else {
        return parse_loose(raw);
    };
    let count = match &caps[1] {
        n if n.chars().all(|c| c.is_ascii_digit()) => n.parse::<i64>().ok()?,
        _ => 1,
    };
    let unit = Unit::from_word(&caps[2])?;
    now.checked_sub_signed(unit.times(count)?)
}
