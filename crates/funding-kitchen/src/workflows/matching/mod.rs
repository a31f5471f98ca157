//! Profile-to-query synthesis and match-result normalization: the
//! pipeline that turns a completed intake profile into a ranked list of
//! funding opportunities.

mod client;
mod normalizer;
mod query;

pub use client::{
    MatchClient, MatchMetadata, MatchServiceError, RawMatchResult, DEFAULT_SEARCH_LIMIT,
};
pub use normalizer::{normalize_matches, FunderMatch};
pub use query::{synthesize_query, DESCRIPTION_SNIPPET_CHARS};
