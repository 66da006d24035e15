//! Plan → search → adjudicate audit pipeline
//!
//! Stages run strictly in order, each reading an immutable [`AuditContext`]
//! and returning a [`StageDelta`] that is merged before the next stage.
//! An LLM failure in any stage aborts the audit.

pub mod prompts;
pub mod stages;
pub mod state;

pub use stages::{Adjudicator, Planner, Researcher, Stage};
pub use state::{AuditContext, AuditOutcome, StageDelta};

use crate::error::Result;
use crate::llm::LanguageModel;
use crate::metrics::METRICS;
use crate::search::WebSearch;
use std::sync::Arc;
use tracing::{error, info};

/// Runs the fixed stage sequence once per audit
pub struct FactCheckPipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl FactCheckPipeline {
    pub fn new(llm: Arc<dyn LanguageModel>, search: Arc<dyn WebSearch>, max_queries: usize) -> Self {
        Self {
            stages: vec![
                Box::new(Planner::new(llm.clone())),
                Box::new(Researcher::new(search, max_queries)),
                Box::new(Adjudicator::new(llm)),
            ],
        }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Audit a block of citations/claims
    pub async fn audit(&self, query: &str) -> Result<AuditOutcome> {
        let mut ctx = AuditContext::new(query);
        info!("Starting audit {}", ctx.audit_id);

        for stage in &self.stages {
            let delta = crate::time_operation!(
                METRICS.stage_duration,
                stage.name(),
                stage.run(&ctx).await
            );

            match delta {
                Ok(delta) => ctx = ctx.apply(delta),
                Err(e) => {
                    error!("Audit {} failed in {}: {}", ctx.audit_id, stage.name(), e);
                    METRICS.record_audit(false);
                    return Err(e);
                }
            }
        }

        METRICS.record_skipped("search_queries", ctx.skipped_queries.len());
        METRICS.record_audit(true);
        info!(
            "Audit {} complete ({} queries skipped)",
            ctx.audit_id,
            ctx.skipped_queries.len()
        );

        Ok(ctx.into_outcome())
    }
}
