//! DOI detection in free text

use once_cell::sync::Lazy;
use regex::Regex;

static DOI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)10.\d{4,9}/[-._;()/:A-Z0-9]+").expect("valid DOI pattern"));

/// All DOI-shaped substrings, in order of appearance
pub fn find_dois(text: &str) -> Vec<String> {
    DOI_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// `DOIs_FOUND: a, b` or `NO_DOI_FOUND`
pub fn doi_status(text: &str) -> String {
    let dois = find_dois(text);
    if dois.is_empty() {
        "NO_DOI_FOUND".to_string()
    } else {
        format!("DOIs_FOUND: {}", dois.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrant_needs_four_digits() {
        let dois = find_dois("See 10.1038/s41586-020-12345 and 10.1/x");
        assert_eq!(dois, vec!["10.1038/s41586-020-12345"]);
    }

    #[test]
    fn test_case_insensitive_suffix() {
        let dois = find_dois("doi:10.1145/3292500.3330701 or 10.5555/ABC.def");
        assert_eq!(dois, vec!["10.1145/3292500.3330701", "10.5555/ABC.def"]);
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(doi_status("no identifiers here"), "NO_DOI_FOUND");
        assert_eq!(
            doi_status("10.1000/a1 then 10.2000/b2"),
            "DOIs_FOUND: 10.1000/a1, 10.2000/b2"
        );
    }
}
