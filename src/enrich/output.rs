use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::dates::{parse_loose, to_timestamp, yesterday};
use crate::model::{ArticleAnalysis, ArticleIdentity, Sentiment};

const DEFAULT_SUMMARY: &str = "No summary available.";

/// Fields as the model returned them. Anything missing or of the wrong type gets a safe default.
#[derive(Debug, Default, PartialEq)]
pub(super) struct ModelFields {
    pub subject_match_score: u8,
    pub matched_details: Vec<String>,
    pub tags: Vec<String>,
    pub sentiment: Sentiment,
    pub crime_related: bool,
    pub unethical_related: bool,
    pub confidence: u8,
    pub summary: String,
    pub catchy_title: String,
    pub publish_date: Option<String>,
    pub is_paywalled: bool,
}

impl ModelFields {
    pub(super) fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            subject_match_score: percent(obj.get("subjectMatchScore")),
            matched_details: string_list(obj.get("matchedDetails")),
            tags: string_list(obj.get("tags")),
            sentiment: obj
                .get("sentiment")
                .and_then(Value::as_str)
                .map(Sentiment::from_label)
                .unwrap_or_default(),
            crime_related: flag(obj.get("crimeRelated")),
            unethical_related: flag(obj.get("unethicalRelated")),
            confidence: percent(obj.get("confidence")),
            summary: text(obj.get("summary")).unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            catchy_title: text(obj.get("catchyTitle")).unwrap_or_default(),
            publish_date: text(obj.get("publishDate")),
            is_paywalled: flag(obj.get("isPaywalled")),
        }
    }

    pub(super) fn into_analysis(
        self,
        resolved_date: &str,
        identity: ArticleIdentity,
        now: DateTime<Utc>,
    ) -> ArticleAnalysis {
        let publish_date = merge_publish_date(resolved_date, self.publish_date.as_deref(), now);
        ArticleAnalysis {
            subject_match_score: self.subject_match_score,
            matched_details: self.matched_details,
            tags: self.tags,
            sentiment: self.sentiment,
            crime_related: self.crime_related,
            unethical_related: self.unethical_related,
            confidence: self.confidence,
            summary: self.summary,
            catchy_title: self.catchy_title,
            publish_date,
            is_paywalled: self.is_paywalled,
            identity,
        }
    }
}

/// The resolved date wins whenever it is non-blank. The model's guess is used only in its
/// absence (normalized to a `Z` timestamp when it parses), and yesterday when both are blank.
pub fn merge_publish_date(resolved: &str, model: Option<&str>, now: DateTime<Utc>) -> String {
    let resolved = resolved.trim();
    if !resolved.is_empty() {
        return resolved.to_string();
    }
    match model.map(str::trim).filter(|d| !d.is_empty()) {
        Some(guess) => parse_loose(guess).map_or_else(|| guess.to_string(), to_timestamp),
        None => to_timestamp(yesterday(now)),
    }
}

/// 0..=100, accepting numbers or numeric strings.
fn percent(value: Option<&Value>) -> u8 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    };
    n.filter(|n: &f64| n.is_finite())
        .map_or(0, |n| n.round().clamp(0.0, 100.0) as u8)
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// A list of strings; a lone string becomes a one-element list, non-strings are skipped.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}
