//! Crate-level error type
//!
//! Component errors (`LlmError`, `SearchError`, `ScholarlyError`,
//! `ClassifierError`) live next to their clients; this enum is what the
//! pipeline and the service layer hand back to callers.

use crate::llm::LlmError;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
