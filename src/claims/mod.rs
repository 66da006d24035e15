//! Claim extraction and verification

pub mod checker;
pub mod extractor;

pub use checker::ClaimChecker;
pub use extractor::extract_claims;
