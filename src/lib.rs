//! Citation and claim auditing service
//!
//! Checks free text for hallucinated citations and unsupported claims:
//! - a plan → search → adjudicate pipeline driven by an LLM
//! - citation validation against CrossRef and Semantic Scholar
//! - NLI verification of claims against retrieved evidence

pub mod api;
pub mod citations;
pub mod claims;
pub mod config;
pub mod error;
pub mod evidence;
pub mod llm;
pub mod metrics;
pub mod nli;
pub mod partial;
pub mod pipeline;
pub mod scholarly;
pub mod search;

pub use config::Config;
pub use error::{Error, Result};
