use crate::model::ResolvedArticle;

pub(super) const SYSTEM_PROMPT: &str = r#"
You are an expert media analyst. Analyze the article below for its relevance to the specified entity and provide a structured summary of its content.

Return a JSON object with the following fields:
- subjectMatchScore (0-100): How strongly the article is about the entity.
- matchedDetails (list of strings): Specific phrases or sentences that mention the entity.
- tags (list of 3-5 keywords): Keywords that best describe the article's main topics.
- sentiment ("positive", "neutral", or "negative"): Overall sentiment of the article.
- crimeRelated (true/false): Whether the article involves crime-related content.
- unethicalRelated (true/false): Whether the article involves unethical behavior.
- confidence (0-100): Your confidence in the analysis.
- summary (in English, 2-3 sentences): A concise summary of the article's content and its relevance to the entity.
- catchyTitle (string): A short, attention-grabbing title in the same language as the article.
- publishDate (ISO format or null): Use the provided Article Publish Date if available, otherwise null.
- isPaywalled (true/false): Whether the article is behind a paywall.

Respond ONLY with a valid JSON object. Do not include any explanation or commentary.
"#;

pub(super) fn user_prompt(entity: &str, description: Option<&str>, article: &ResolvedArticle) -> String {
    let description = description.map(str::trim).filter(|d| !d.is_empty()).unwrap_or("N/A");
    let publish_date = Some(article.publish_date.trim())
        .filter(|d| !d.is_empty())
        .unwrap_or("Unknown");

    format!(
        "Entity Name: {entity}\n\
         Entity Description: {description}\n\
         Article Title: {}\n\
         Article Content: {}\n\
         Article Publish Date: {publish_date}",
        article.title,
        article.analysis_text(),
    )
}
