//! Citation handling
//!
//! - Style-based extraction (IEEE, APA, MLA)
//! - DOI detection
//! - Existence, metadata, plausibility and link validation

pub mod doi;
pub mod extract;
pub mod validator;

pub use doi::{doi_status, find_dois};
pub use extract::extract_citations;
pub use validator::{is_semantically_plausible, CitationReport, CitationValidator};
