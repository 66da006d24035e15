//! Sentence-level claim extraction

use unicode_segmentation::UnicodeSegmentation;

const MIN_CLAIM_WORDS: usize = 5;

/// Imperative openers that mark a sentence as an instruction
const INSTRUCTION_PREFIXES: [&str; 4] = ["please", "do ", "try ", "consider "];

fn is_claim(sentence: &str) -> bool {
    if sentence.ends_with('?') {
        return false;
    }
    if sentence.split_whitespace().count() < MIN_CLAIM_WORDS {
        return false;
    }
    let lowered = sentence.to_lowercase();
    !INSTRUCTION_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Declarative sentences worth verifying, in document order
pub fn extract_claims(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty() && is_claim(s))
        .map(str::to_string)
        .collect()
}
