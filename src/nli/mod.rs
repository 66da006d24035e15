//! Natural-language-inference verification of claims
//!
//! - Zero-shot classification of each (claim, evidence) pair
//! - Contradiction-first aggregation into one verdict per claim

pub mod aggregator;
pub mod classifier;
pub mod models;
pub mod verifier;

pub use aggregator::{aggregate, COMMIT_THRESHOLD};
pub use classifier::{Classification, ClassifierError, HttpZeroShotClassifier, ZeroShotClassifier};
pub use models::{ClaimVerification, NliJudgment, NliLabel, VerdictLabel, VerificationVerdict};
pub use verifier::NliVerifier;
