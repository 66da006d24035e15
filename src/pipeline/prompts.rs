//! Prompt templates for the planner and adjudicator stages

use chrono::NaiveDate;

pub fn planner_prompt(query: &str) -> String {
    format!(
        r#"The user provided these citations/claims: {query}

TASK: Generate search queries to verify existence.
For each item, generate:
1. An EXACT query in quotes: "Full Title of Paper"
2. A BROAD query: Author Name + Journal + Year

Output ONLY the queries, one per line. Do not add numbers or bullets."#
    )
}

pub fn adjudicator_prompt(query: &str, research: &str, today: NaiveDate) -> String {
    let today = today.format("%B %-d, %Y");
    format!(
        r#"ROLE: Forensic Citation Auditor (Strict Mode)
CURRENT DATE: {today}

INPUT LIST: {query}
SEARCH EVIDENCE: {research}

STRICT VERDICT RULES:
1. If a citation's EXACT TITLE is not found in the search evidence, check if the Author/Journal is real.
2. If the Author is real but the Title is missing, mark as HALLUCINATION (likely a 'fake title' attributed to a real person).
3. Famous papers (e.g., Vaswani 2017 'Attention is All You Need') must be marked REAL.
4. Recent data (the current and previous year) must be verified against current events.
5. Allowed verdicts: REAL, HALLUCINATION, UNVERIFIABLE, CONTRADICTED.

OUTPUT FORMAT:
| # | Citation/Claim | Verdict | Specific Reason |
|---|----------------|---------|-----------------|
(Audit every single line)

OVERALL SUMMARY: [Short summary of findings]"#
    )
}
