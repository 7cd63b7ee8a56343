//! Search orchestration: query expansion with keyword translation, and the throttled
//! provider fan-out that collects dated, deduplicated articles.

pub mod aggregate;
pub mod expand;
mod lang;

pub use aggregate::{AggregateRequest, aggregate};
pub use expand::{expand_queries, query_variants, translate_keywords};
pub use lang::{SearchLang, translation_target};
