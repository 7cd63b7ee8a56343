use serde::{Deserialize, Serialize};

use crate::model::RawNewsItem;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRequest {
    pub q: String,
    pub hl: String,
    pub gl: String,
    pub num: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_before: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub news: Vec<RawNewsItem>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
