//! Evidence retrieval and ranking

pub mod ranker;
pub mod retrieval;

pub use ranker::{overlap_score, rank, ScoredSnippet, TOP_K};
pub use retrieval::EvidenceRetriever;
