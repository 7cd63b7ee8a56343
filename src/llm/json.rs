use serde_json::Value;

/// Parses a model reply that should be one JSON object, tolerating a Markdown code fence.
pub fn parse_object(content: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fence(content))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
