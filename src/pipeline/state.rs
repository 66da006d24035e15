//! Immutable audit context and the per-stage deltas merged into it

use crate::partial::Skipped;
use serde::Serialize;
use uuid::Uuid;

/// Request context handed to each stage by reference
#[derive(Debug, Clone, PartialEq)]
pub struct AuditContext {
    pub audit_id: Uuid,
    pub query: String,
    pub plan: Option<String>,
    pub research: Option<String>,
    pub verdict: Option<String>,
    pub skipped_queries: Vec<Skipped>,
}

/// What a single stage contributes
#[derive(Debug, Clone, PartialEq)]
pub enum StageDelta {
    Plan(String),
    Research { text: String, skipped: Vec<Skipped> },
    Verdict(String),
}

impl AuditContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            audit_id: Uuid::new_v4(),
            query: query.into(),
            plan: None,
            research: None,
            verdict: None,
            skipped_queries: Vec::new(),
        }
    }

    /// Merge a stage's output, producing the context for the next stage
    pub fn apply(self, delta: StageDelta) -> Self {
        match delta {
            StageDelta::Plan(plan) => Self {
                plan: Some(plan),
                ..self
            },
            StageDelta::Research { text, skipped } => Self {
                research: Some(text),
                skipped_queries: skipped,
                ..self
            },
            StageDelta::Verdict(verdict) => Self {
                verdict: Some(verdict),
                ..self
            },
        }
    }

    pub fn plan_text(&self) -> &str {
        self.plan.as_deref().unwrap_or_default()
    }

    pub fn research_text(&self) -> &str {
        self.research.as_deref().unwrap_or_default()
    }

    pub fn into_outcome(self) -> AuditOutcome {
        AuditOutcome {
            audit_id: self.audit_id,
            query: self.query,
            plan: self.plan.unwrap_or_default(),
            research: self.research.unwrap_or_default(),
            verdict: self.verdict.unwrap_or_default(),
            skipped_queries: self.skipped_queries.len(),
            skipped: self.skipped_queries,
        }
    }
}

/// Final result of one audit
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuditOutcome {
    pub audit_id: Uuid,
    pub query: String,
    pub plan: String,
    pub research: String,
    pub verdict: String,
    pub skipped_queries: usize,
    pub skipped: Vec<Skipped>,
}
