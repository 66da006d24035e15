//! Bibliographic records and the wire formats they are decoded from

use serde::{Deserialize, Serialize};

/// Where a record came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Crossref,
    SemanticScholar,
}

/// Normalized bibliographic record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaperRecord {
    pub source: RecordSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
}

impl PaperRecord {
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn has_year(&self) -> bool {
        self.year.is_some()
    }

    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().filter(|d| !d.is_empty())
    }

    /// Text used as evidence: the cleaned abstract, else the title
    pub fn evidence_text(&self) -> Option<String> {
        if let Some(abstract_text) = self.abstract_text.as_deref() {
            let cleaned = clean_text(abstract_text);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
        self.title.clone().filter(|t| !t.is_empty())
    }
}

/// Strip JATS paragraph tags and surrounding whitespace
pub fn clean_text(text: &str) -> String {
    text.replace("<jats:p>", "")
        .replace("</jats:p>", "")
        .trim()
        .to_string()
}

// CrossRef `/works` response
#[derive(Debug, Deserialize)]
pub(crate) struct CrossrefResponse {
    #[serde(default)]
    pub message: CrossrefMessage,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct CrossrefMessage {
    #[serde(default)]
    pub items: Vec<CrossrefItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CrossrefItem {
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(rename = "DOI", default)]
    pub doi: Option<String>,
    #[serde(rename = "published-print", default)]
    pub published_print: Option<DateParts>,
    #[serde(rename = "published-online", default)]
    pub published_online: Option<DateParts>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DateParts {
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl DateParts {
    fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first().copied().flatten()
    }
}

impl From<CrossrefItem> for PaperRecord {
    fn from(item: CrossrefItem) -> Self {
        let title = if item.title.is_empty() {
            None
        } else {
            Some(item.title.join(" "))
        };

        let year = item
            .published_print
            .as_ref()
            .and_then(DateParts::year)
            .or_else(|| item.published_online.as_ref().and_then(DateParts::year));

        Self {
            source: RecordSource::Crossref,
            title,
            doi: item.doi,
            year,
            abstract_text: item.abstract_text,
        }
    }
}

// Semantic Scholar `/paper/search` response
#[derive(Debug, Deserialize)]
pub(crate) struct SemanticScholarResponse {
    #[serde(default)]
    pub data: Vec<SemanticScholarPaper>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SemanticScholarPaper {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(rename = "externalIds", default)]
    pub external_ids: Option<ExternalIds>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExternalIds {
    #[serde(rename = "DOI", default)]
    pub doi: Option<String>,
}

impl From<SemanticScholarPaper> for PaperRecord {
    fn from(paper: SemanticScholarPaper) -> Self {
        Self {
            source: RecordSource::SemanticScholar,
            title: paper.title,
            doi: paper.external_ids.and_then(|ids| ids.doi),
            year: paper.year,
            abstract_text: paper.abstract_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossref_item_prefers_print_year() {
        let item: CrossrefItem = serde_json::from_value(serde_json::json!({
            "title": ["Attention Is All", "You Need"],
            "DOI": "10.5555/3295222.3295349",
            "published-print": {"date-parts": [[2017, 12]]},
            "published-online": {"date-parts": [[2016]]}
        }))
        .unwrap();

        let record = PaperRecord::from(item);
        assert_eq!(record.title.as_deref(), Some("Attention Is All You Need"));
        assert_eq!(record.year, Some(2017));
        assert_eq!(record.doi(), Some("10.5555/3295222.3295349"));
    }

    #[test]
    fn test_crossref_item_falls_back_to_online_year() {
        let item: CrossrefItem = serde_json::from_value(serde_json::json!({
            "title": [],
            "published-online": {"date-parts": [[2021, 3, 1]]}
        }))
        .unwrap();

        let record = PaperRecord::from(item);
        assert!(!record.has_title());
        assert_eq!(record.year, Some(2021));
    }

    #[test]
    fn test_semantic_scholar_paper_doi_from_external_ids() {
        let paper: SemanticScholarPaper = serde_json::from_value(serde_json::json!({
            "paperId": "abc",
            "title": "BERT",
            "year": 2019,
            "externalIds": {"DOI": "10.18653/v1/N19-1423", "ArXiv": "1810.04805"}
        }))
        .unwrap();

        let record = PaperRecord::from(paper);
        assert_eq!(record.doi(), Some("10.18653/v1/N19-1423"));
        assert!(record.has_year());
    }

    #[test]
    fn test_evidence_text_prefers_cleaned_abstract() {
        let record = PaperRecord {
            source: RecordSource::Crossref,
            title: Some("Title".to_string()),
            doi: None,
            year: None,
            abstract_text: Some("  <jats:p>Abstract body</jats:p> ".to_string()),
        };
        assert_eq!(record.evidence_text().as_deref(), Some("Abstract body"));

        let untitled = PaperRecord {
            title: None,
            abstract_text: None,
            ..record
        };
        assert!(untitled.evidence_text().is_none());
    }
}
