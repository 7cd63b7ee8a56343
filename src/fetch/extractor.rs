use std::sync::LazyLock;

use dom_smoothie::{Config, Readability};
use regex::Regex;
use tracing::debug;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b.*?</table\s*>").expect("valid regex"));
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("valid regex"));

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("readability failed: {0}")]
    Readability(String),

    #[error("page not recognised as an article")]
    NotReadable,
}

/// Main-body plain text of an HTML page. Comments and tables are dropped before
/// readability runs; links and images contribute only their anchor text.
pub(super) fn extract_text(html: &str, url: &str) -> Result<String, ExtractError> {
    let uncommented = COMMENT_RE.replace_all(html, "");
    let cleaned = TABLE_RE.replace_all(&uncommented, "");

    let mut readability = Readability::new(&*cleaned, Some(url), Some(Config::default()))
        .map_err(|e| ExtractError::Readability(e.to_string()))?;

    if !readability.is_probably_readable() {
        debug!(url, "page not probably readable");
        return Err(ExtractError::NotReadable);
    }

    let article = readability
        .parse()
        .map_err(|e| ExtractError::Readability(e.to_string()))?;

    Ok(normalize_whitespace(&article.text_content))
}

fn normalize_whitespace(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    BLANK_LINES_RE
        .replace_all(lines.join("\n").trim(), "\n\n")
        .into_owned()
}
