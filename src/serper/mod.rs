//! Google Serper news search: the provider behind the aggregation fan-out.

pub mod client;
#[cfg(test)]
pub(crate) mod mock;
pub mod types;

pub use client::{NewsQuery, NewsSearch, SerperClient, SerperError};
