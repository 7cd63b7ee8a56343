use std::time::Duration;

use tracing::{debug, warn};

use super::lang::translation_target;
use crate::llm::{ChatClient, ChatRequest, LlmError};

const TRANSLATION_TIMEOUT: Duration = Duration::from_secs(15);
const TRANSLATION_MAX_TOKENS: u32 = 100;
const MAX_TAG_VARIANTS: usize = 3;
const MAX_TRANSLATED_VARIANTS: usize = 2;

/// Translate `keywords` into `target` with one model call.
///
/// The reply is read as a comma-separated list. No keywords means no call.
pub async fn translate_keywords(
    llm: &impl ChatClient,
    keywords: &[String],
    target: &str,
) -> Result<Vec<String>, LlmError> {
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let prompt = format!(
        "Translate the following keywords into {target}. Return only a comma-separated list.\n\n{}",
        keywords.join(", ")
    );
    let request =
        ChatRequest::new("You are a translator.", &prompt).max_tokens(TRANSLATION_MAX_TOKENS);
    let reply = llm.complete(&request, TRANSLATION_TIMEOUT).await?;

    Ok(reply
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect())
}

/// `[entity]`, then `entity tag` for the first three tags, then for the first two translations.
pub fn query_variants(entity: &str, tags: &[String], translated: &[String]) -> Vec<String> {
    let with_entity = |tag: &String| format!("{entity} {tag}");

    std::iter::once(entity.to_string())
        .chain(tags.iter().take(MAX_TAG_VARIANTS).map(with_entity))
        .chain(translated.iter().take(MAX_TRANSLATED_VARIANTS).map(with_entity))
        .collect()
}

/// Build the query variants for a request. Translation failures only cost the translated
/// variants.
pub async fn expand_queries(
    llm: &impl ChatClient,
    entity: &str,
    tags: &[String],
    country: &str,
) -> Vec<String> {
    let target = translation_target(country);
    let translated = match translate_keywords(llm, tags, target).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!(error = %e, target, "keyword translation failed, continuing without it");
            Vec::new()
        }
    };

    let variants = query_variants(entity, tags, &translated);
    debug!(count = variants.len(), ?variants, "query variants");
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::ScriptedChat;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn entity_alone_without_tags() {
        assert_eq!(query_variants("Acme Corp", &[], &[]), vec!["Acme Corp"]);
    }

    #[test]
    fn variants_are_bounded() {
        let variants = query_variants(
            "Acme",
            &tags(&["fraud", "lawsuit", "merger", "layoffs"]),
            &tags(&["धोखाधड़ी", "मुकदमा", "विलय"]),
        );
        assert_eq!(
            variants,
            vec![
                "Acme",
                "Acme fraud",
                "Acme lawsuit",
                "Acme merger",
                "Acme धोखाधड़ी",
                "Acme मुकदमा",
            ]
        );
    }

    #[tokio::test]
    async fn translation_reply_is_split_and_trimmed() {
        let llm = ScriptedChat::replying(vec![" धोखाधड़ी , मुकदमा,, "]);
        let translated = translate_keywords(&llm, &tags(&["fraud", "lawsuit"]), "Hindi")
            .await
            .unwrap();

        assert_eq!(translated, tags(&["धोखाधड़ी", "मुकदमा"]));
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 100);
        assert!(requests[0].messages[1].content.contains("into Hindi"));
        assert!(requests[0].messages[1].content.ends_with("fraud, lawsuit"));
    }

    #[tokio::test]
    async fn no_tags_means_no_model_call() {
        let llm = ScriptedChat::replying(vec!["unused"]);
        let translated = translate_keywords(&llm, &[], "Hindi").await.unwrap();

        assert!(translated.is_empty());
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn expansion_uses_country_target_language() {
        let llm = ScriptedChat::replying(vec!["धोखाधड़ी"]);
        let variants = expand_queries(&llm, "Acme", &tags(&["fraud"]), "in").await;

        assert_eq!(variants, vec!["Acme", "Acme fraud", "Acme धोखाधड़ी"]);
        assert!(llm.requests()[0].messages[1].content.contains("into Hindi"));
    }

    #[tokio::test]
    async fn other_countries_ask_for_local_language() {
        let llm = ScriptedChat::replying(vec!["fraude"]);
        expand_queries(&llm, "Acme", &tags(&["fraud"]), "fr").await;

        assert!(llm.requests()[0].messages[1].content.contains("into local language"));
    }

    #[tokio::test]
    async fn translation_failure_keeps_native_variants() {
        let llm = ScriptedChat::failing(LlmError::RateLimited);
        let variants = expand_queries(&llm, "Acme", &tags(&["fraud", "lawsuit"]), "in").await;

        assert_eq!(variants, vec!["Acme", "Acme fraud", "Acme lawsuit"]);
    }
}
