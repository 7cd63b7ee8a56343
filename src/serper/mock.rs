use std::collections::VecDeque;
use std::sync::Mutex;

use super::{NewsQuery, NewsSearch, SerperError};
use crate::model::RawNewsItem;

/// A provider call as the mock saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedQuery {
    pub query: String,
    pub language: String,
    pub country: String,
    pub windowed: bool,
}

/// Answers provider calls from a script and records them. An exhausted script returns no items.
pub(crate) struct ScriptedSearch {
    responses: Mutex<VecDeque<Result<Vec<RawNewsItem>, SerperError>>>,
    queries: Mutex<Vec<RecordedQuery>>,
}

impl ScriptedSearch {
    pub(crate) fn new(responses: Vec<Result<Vec<RawNewsItem>, SerperError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub(crate) fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl NewsSearch for ScriptedSearch {
    async fn search(&self, query: &NewsQuery<'_>) -> Result<Vec<RawNewsItem>, SerperError> {
        self.queries.lock().unwrap().push(RecordedQuery {
            query: query.query.to_string(),
            language: query.language.to_string(),
            country: query.country.to_string(),
            windowed: query.window.is_some(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }
}

pub(crate) fn news_item(title: &str, link: &str, date: &str) -> RawNewsItem {
    RawNewsItem {
        title: title.to_string(),
        link: link.to_string(),
        source: Some("Example News".to_string()),
        snippet: format!("{title} snippet"),
        date: date.to_string(),
    }
}
