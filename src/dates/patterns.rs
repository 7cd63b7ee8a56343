//! Calendar dates embedded in URLs, titles and article text.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

const MIN_YEAR: i32 = 2020;
const MAX_YEAR: i32 = 2030;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_ABBR: &str = "(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*";
const MONTH_FULL: &str =
    "(january|february|march|april|may|june|july|august|september|october|november|december)";

/// Order of the three captures in a pattern.
#[derive(Debug, Clone, Copy)]
enum Order {
    Ymd,
    Dmy,
    Mdy,
}

struct DatePattern {
    regex: Regex,
    order: Order,
}

impl DatePattern {
    fn new(pattern: &str, order: Order) -> Self {
        Self {
            regex: Regex::new(pattern).expect("valid regex"),
            order,
        }
    }

    /// First match in `text` that forms a valid date in the accepted year range.
    fn first_valid(&self, text: &str) -> Option<NaiveDate> {
        self.regex.captures_iter(text).find_map(|caps| {
            let (y, m, d) = match self.order {
                Order::Ymd => (&caps[1], &caps[2], &caps[3]),
                Order::Dmy => (&caps[3], &caps[2], &caps[1]),
                Order::Mdy => (&caps[3], &caps[1], &caps[2]),
            };
            calendar_date(y.parse().ok()?, month_number(m)?, d.parse().ok()?)
        })
    }
}

static URL_PATTERNS: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    vec![
        DatePattern::new(r"/(\d{4})/(\d{1,2})/(\d{1,2})/", Order::Ymd),
        DatePattern::new(r"/(\d{4})-(\d{1,2})-(\d{1,2})", Order::Ymd),
        DatePattern::new(r"(\d{4})(\d{2})(\d{2})", Order::Ymd),
    ]
});

static TITLE_PATTERNS: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    vec![
        DatePattern::new(&format!(r"(\d{{1,2}})\s+{MONTH_ABBR}\s+(\d{{4}})"), Order::Dmy),
        DatePattern::new(&format!(r"{MONTH_ABBR}\s+(\d{{1,2}}),?\s+(\d{{4}})"), Order::Mdy),
    ]
});

/// Tried in priority order against lowercased article text.
static CONTENT_PATTERNS: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    vec![
        DatePattern::new(
            &format!(r"(?:updated|published|posted)\s*:?\s*(\d{{1,2}})\s+{MONTH_FULL}\s+(\d{{4}})"),
            Order::Dmy,
        ),
        DatePattern::new(&format!(r"(\d{{1,2}})\s+{MONTH_FULL}\s+(\d{{4}})"), Order::Dmy),
        DatePattern::new(&format!(r"{MONTH_FULL}\s+(\d{{1,2}}),?\s+(\d{{4}})"), Order::Mdy),
        DatePattern::new(r"(\d{4})-(\d{1,2})-(\d{1,2})", Order::Ymd),
        DatePattern::new(r"(\d{1,2})/(\d{1,2})/(\d{4})", Order::Dmy),
        DatePattern::new(r"(\d{1,2})-(\d{1,2})-(\d{4})", Order::Dmy),
    ]
});

fn month_number(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return Some(n);
    }
    let prefix = token.get(..3)?.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn first_in(patterns: &[DatePattern], text: &str) -> Option<NaiveDate> {
    patterns.iter().find_map(|p| p.first_valid(text))
}

/// Date from the URL path, else from a `D Mon YYYY` / `Mon D, YYYY` title.
pub fn from_url_or_title(url: &str, title: &str) -> Option<NaiveDate> {
    first_in(&URL_PATTERNS, url).or_else(|| {
        if title.trim().is_empty() {
            None
        } else {
            first_in(&TITLE_PATTERNS, &title.to_lowercase())
        }
    })
}

/// Date mined from article text. The highest-priority pattern kind with a valid match wins.
pub fn from_content(text: &str) -> Option<NaiveDate> {
    if text.trim().is_empty() {
        return None;
    }
    first_in(&CONTENT_PATTERNS, &text.to_lowercase())
}
