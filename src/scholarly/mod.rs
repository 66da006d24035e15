//! Academic metadata sources (CrossRef, Semantic Scholar)

pub mod client;
pub mod models;

pub use client::{CrossrefClient, MetadataSource, ScholarlyError, SemanticScholarClient};
pub use models::{clean_text, PaperRecord, RecordSource};
