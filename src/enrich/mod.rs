//! Per-article enrichment: one structured-extraction call to the model, merged with what the
//! aggregation step already knows. Every failure becomes an error item for that article only.

mod output;
mod prompt;

pub use output::merge_publish_date;

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::llm::{ChatClient, ChatRequest, LlmError, json};
use crate::model::{ArticleAnalysis, ArticleFailure, EnrichedArticle, ResolvedArticle};
use output::ModelFields;

const ENRICH_TIMEOUT: Duration = Duration::from_secs(30);
pub const EMPTY_CONTENT_ERROR: &str = "Article content is empty.";

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("model returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model returned JSON that is not an object")]
    NotAnObject,
}

/// Enrich one article. Never fails: errors come back as [`EnrichedArticle::Failed`].
pub async fn enrich_article(
    llm: &impl ChatClient,
    entity: &str,
    description: Option<&str>,
    article: &ResolvedArticle,
    now: DateTime<Utc>,
) -> EnrichedArticle {
    if article.analysis_text().trim().is_empty() {
        return failure(article, EMPTY_CONTENT_ERROR.to_string());
    }

    match analyze(llm, entity, description, article, now).await {
        Ok(analysis) => {
            debug!(url = %article.url, score = analysis.subject_match_score, "article enriched");
            EnrichedArticle::Analyzed(analysis)
        }
        Err(e) => {
            warn!(url = %article.url, error = %e, "article enrichment failed");
            failure(article, e.to_string())
        }
    }
}

async fn analyze(
    llm: &impl ChatClient,
    entity: &str,
    description: Option<&str>,
    article: &ResolvedArticle,
    now: DateTime<Utc>,
) -> Result<ArticleAnalysis, EnrichError> {
    let request = ChatRequest::new(
        prompt::SYSTEM_PROMPT,
        &prompt::user_prompt(entity, description, article),
    )
    .json_object();
    let reply = llm.complete(&request, ENRICH_TIMEOUT).await?;

    let value = json::parse_object(&reply)?;
    let fields = value
        .as_object()
        .map(ModelFields::from_object)
        .ok_or(EnrichError::NotAnObject)?;
    Ok(fields.into_analysis(&article.publish_date, article.identity(), now))
}

fn failure(article: &ResolvedArticle, error: String) -> EnrichedArticle {
    EnrichedArticle::Failed(ArticleFailure {
        error,
        identity: article.identity(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::ScriptedChat;
    use crate::model::Sentiment;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 10, 12, 0, 0).unwrap()
    }

    fn article(content: &str, snippet: &str) -> ResolvedArticle {
        ResolvedArticle {
            title: "Acme wins contract".into(),
            url: "https://example.com/acme".into(),
            source: "Example News".into(),
            snippet: snippet.into(),
            content: content.into(),
            publish_date: "2025-01-01T00:00:00Z".into(),
            raw_date: "Jan 1, 2025".into(),
        }
    }

    #[tokio::test]
    async fn empty_content_short_circuits_without_model_call() {
        let llm = ScriptedChat::replying(vec!["{}"]);
        let result = enrich_article(&llm, "Acme", None, &article("  ", ""), now()).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "error": "Article content is empty.",
                "originalTitle": "Acme wins contract",
                "url": "https://example.com/acme",
                "source": "Example News"
            })
        );
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn model_date_never_overrides_resolved_date() {
        let llm = ScriptedChat::replying(vec![
            r#"{"subjectMatchScore": 80, "sentiment": "negative", "publishDate": "2025-06-06"}"#,
        ]);
        let result = enrich_article(&llm, "Acme", None, &article("Body", ""), now()).await;

        let analysis = match result {
            EnrichedArticle::Analyzed(analysis) => analysis,
            other => panic!("expected analysis, got {other:?}"),
        };
        assert_eq!(analysis.publish_date, "2025-01-01T00:00:00Z");
        assert_eq!(analysis.subject_match_score, 80);
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(analysis.identity, article("Body", "").identity());
    }

    #[tokio::test]
    async fn snippet_is_used_when_content_blank() {
        let llm = ScriptedChat::replying(vec!["{}"]);
        let article = article("", "Snippet text");
        let result = enrich_article(&llm, "Acme", Some("Sensors"), &article, now()).await;

        assert!(!result.is_failure());
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        let user = &requests[0].messages[1].content;
        assert!(user.contains("Article Content: Snippet text"));
        assert!(user.contains("Entity Description: Sensors"));
        assert_eq!(requests[0].max_tokens, 1000);
        assert!(requests[0].response_format.is_some());
    }

    #[tokio::test]
    async fn model_error_becomes_error_item() {
        let llm = ScriptedChat::failing(LlmError::Api {
            code: 500,
            message: "upstream down".into(),
        });
        let result = enrich_article(&llm, "Acme", None, &article("Body", ""), now()).await;

        let failure = match result {
            EnrichedArticle::Failed(failure) => failure,
            other => panic!("expected failure, got {other:?}"),
        };
        assert!(failure.error.contains("upstream down"));
        assert_eq!(failure.identity.url, "https://example.com/acme");
    }

    #[tokio::test]
    async fn malformed_json_becomes_error_item() {
        let llm = ScriptedChat::replying(vec!["Sure! Here is the analysis."]);
        let result = enrich_article(&llm, "Acme", None, &article("Body", ""), now()).await;

        let failure = match result {
            EnrichedArticle::Failed(failure) => failure,
            other => panic!("expected failure, got {other:?}"),
        };
        assert!(failure.error.starts_with("model returned malformed JSON"));
    }

    #[tokio::test]
    async fn non_object_json_becomes_error_item() {
        let llm = ScriptedChat::replying(vec!["[1, 2, 3]"]);
        let result = enrich_article(&llm, "Acme", None, &article("Body", ""), now()).await;

        let failure = match result {
            EnrichedArticle::Failed(failure) => failure,
            other => panic!("expected failure, got {other:?}"),
        };
        assert_eq!(failure.error, "model returned JSON that is not an object");
    }
}
