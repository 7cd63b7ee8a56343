/// Interface-language hint sent with each provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLang {
    En,
    Hi,
    Auto,
}

impl SearchLang {
    /// Every query variant is issued once per entry, in this order.
    pub const ALL: [SearchLang; 3] = [SearchLang::En, SearchLang::Hi, SearchLang::Auto];

    pub fn as_param(self) -> &'static str {
        match self {
            SearchLang::En => "en",
            SearchLang::Hi => "hi",
            SearchLang::Auto => "auto",
        }
    }
}

/// Language that tags are translated into for a (lowercased) country code.
/// Only India has an explicit mapping; other countries get a generic instruction.
pub fn translation_target(country: &str) -> &'static str {
    match country {
        "in" => "Hindi",
        _ => "local language",
    }
}
