//! Entity news aggregation: expand queries, collect and date articles from a news provider,
//! filter them to a date window, and enrich each one with a language model.

pub mod config;
pub mod dates;
pub mod enrich;
pub mod fetch;
pub mod filter;
pub mod llm;
pub mod model;
pub mod pipeline;
pub mod search;
pub mod serper;

pub use config::Config;
pub use model::{DateRange, SearchRequest, SearchResponse};
pub use pipeline::Pipeline;

pub const USER_AGENT: &str = concat!("medialens/", env!("CARGO_PKG_VERSION"));

const ERROR_SNIPPET_BYTES: usize = 200;

/// Leading part of an error body, cut on a char boundary.
pub(crate) fn body_snippet(text: &str) -> &str {
    &text[..text.floor_char_boundary(ERROR_SNIPPET_BYTES)]
}
