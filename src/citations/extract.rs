//! Citation-style detection in free text

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// (style, pattern) pairs; capture group 1 is the citation
static CITATION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        ("ieee", Regex::new(r"\[(\d+)\]").expect("valid ieee pattern")),
        (
            "apa_et_al",
            Regex::new(r"([A-Z][a-zA-Z]+ et al\., \d{4})").expect("valid apa_et_al pattern"),
        ),
        (
            "apa_full",
            Regex::new(r"([A-Z][a-zA-Z]+,\s(?:[A-Z]\.\s?)+\(\d{4}\))").expect("valid apa_full pattern"),
        ),
        ("mla", Regex::new(r"“(.+?)”").expect("valid mla pattern")),
    ]
});

/// Distinct citations found in `text`, in first-seen order (style by style)
pub fn extract_citations(text: &str) -> Vec<String> {
    let mut citations = IndexSet::new();

    for (_, pattern) in CITATION_PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            if let Some(m) = captures.get(1) {
                citations.insert(m.as_str().to_string());
            }
        }
    }

    citations.into_iter().collect()
}
