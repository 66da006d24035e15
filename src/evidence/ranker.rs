//! Keyword-overlap ranking of evidence snippets

use std::collections::HashSet;

/// Maximum number of snippets returned by [`rank`]
pub const TOP_K: usize = 5;

/// A snippet tagged with its overlap score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSnippet {
    pub text: String,
    pub score: usize,
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of distinct lower-cased words shared by `claim` and `snippet`
pub fn overlap_score(claim: &str, snippet: &str) -> usize {
    let claim_words = word_set(claim);
    word_set(snippet).intersection(&claim_words).count()
}

/// Score every snippet and sort by descending score.
///
/// `sort_by` is stable, so equal scores keep their arrival order.
pub fn score_all(snippets: &[String], claim: &str) -> Vec<ScoredSnippet> {
    let claim_words = word_set(claim);

    let mut scored: Vec<ScoredSnippet> = snippets
        .iter()
        .map(|snippet| ScoredSnippet {
            score: word_set(snippet).intersection(&claim_words).count(),
            text: snippet.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Top [`TOP_K`] snippets by overlap with the claim
pub fn rank(snippets: &[String], claim: &str) -> Vec<String> {
    score_all(snippets, claim)
        .into_iter()
        .take(TOP_K)
        .map(|s| s.text)
        .collect()
}
