//! The three audit stages

use super::prompts::{adjudicator_prompt, planner_prompt};
use super::state::{AuditContext, StageDelta};
use crate::citations::doi_status;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::partial::Partial;
use crate::search::WebSearch;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// One step of the audit pipeline
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stage name (used for logs and metrics)
    fn name(&self) -> &'static str;

    /// Read the context and return this stage's contribution
    async fn run(&self, ctx: &AuditContext) -> Result<StageDelta>;
}

/// Turns the user query into search queries, one per line
pub struct Planner {
    llm: Arc<dyn LanguageModel>,
}

impl Planner {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Stage for Planner {
    fn name(&self) -> &'static str {
        "planner"
    }

    async fn run(&self, ctx: &AuditContext) -> Result<StageDelta> {
        let plan = self.llm.complete(&planner_prompt(&ctx.query)).await?;
        debug!("Plan has {} lines", plan.lines().count());
        Ok(StageDelta::Plan(plan))
    }
}

/// Runs the planned queries through web search
pub struct Researcher {
    search: Arc<dyn WebSearch>,
    max_queries: usize,
}

impl Researcher {
    pub fn new(search: Arc<dyn WebSearch>, max_queries: usize) -> Self {
        Self { search, max_queries }
    }

    /// First `max_queries` lines of the trimmed plan
    pub fn queries<'a>(&self, plan: &'a str) -> Vec<&'a str> {
        plan.trim().split('\n').take(self.max_queries).collect()
    }
}

#[async_trait]
impl Stage for Researcher {
    fn name(&self) -> &'static str {
        "researcher"
    }

    async fn run(&self, ctx: &AuditContext) -> Result<StageDelta> {
        let mut results: Partial<String> = Partial::new();

        // the header is written before the search, so a failed query keeps it
        for query in self.queries(ctx.plan_text()) {
            results.push(format!("\n--- Search for: {} ---\n", query));
            match self.search.run(query).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Search failed for query {:?}: {}", query, e);
                    results.skip(query, e);
                }
            }
        }

        let text = format!(
            "{}\n\n[System_Internal_Check]: {}",
            results.items.concat(),
            doi_status(&ctx.query)
        );

        Ok(StageDelta::Research {
            text,
            skipped: results.skipped,
        })
    }
}

/// Produces the final verdict table from query and research
pub struct Adjudicator {
    llm: Arc<dyn LanguageModel>,
}

impl Adjudicator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Stage for Adjudicator {
    fn name(&self) -> &'static str {
        "adjudicator"
    }

    async fn run(&self, ctx: &AuditContext) -> Result<StageDelta> {
        let today = chrono::Local::now().date_naive();
        let prompt = adjudicator_prompt(&ctx.query, ctx.research_text(), today);
        let verdict = self.llm.complete(&prompt).await?;
        Ok(StageDelta::Verdict(verdict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchError;

    struct EchoSearch;

    #[async_trait]
    impl WebSearch for EchoSearch {
        async fn run(&self, query: &str) -> std::result::Result<String, SearchError> {
            if query.contains("broken") {
                Err(SearchError::Timeout("10s".to_string()))
            } else {
                Ok(format!("results for {}", query))
            }
        }
    }

    #[test]
    fn test_queries_take_first_lines_of_trimmed_plan() {
        let researcher = Researcher::new(Arc::new(EchoSearch), 5);
        let plan = "\n  a\nb\nc\nd\ne\nf\n";
        assert_eq!(researcher.queries(plan), vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_researcher_keeps_header_of_failed_query() {
        let researcher = Researcher::new(Arc::new(EchoSearch), 5);
        let ctx = AuditContext::new("See 10.1038/nature14539")
            .apply(StageDelta::Plan("first\nbroken one\nthird".to_string()));

        let delta = researcher.run(&ctx).await.unwrap();
        let StageDelta::Research { text, skipped } = delta else {
            panic!("expected research delta");
        };

        assert_eq!(
            text,
            "\n--- Search for: first ---\nresults for first\
             \n--- Search for: broken one ---\n\
             \n--- Search for: third ---\nresults for third\
             \n\n[System_Internal_Check]: DOIs_FOUND: 10.1038/nature14539"
        );
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].item, "broken one");
    }
}
