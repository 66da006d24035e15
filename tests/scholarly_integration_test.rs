//! Integration tests for the scholarly clients and citation validator
//! against mock CrossRef, Semantic Scholar and DOI resolver servers.

use citation_auditor::citations::validator::{ISSUE_LINK_UNREACHABLE, ISSUE_SUSPICIOUS};
use citation_auditor::citations::CitationValidator;
use citation_auditor::config::ScholarlyConfig;
use citation_auditor::evidence::EvidenceRetriever;
use citation_auditor::scholarly::{
    CrossrefClient, MetadataSource, RecordSource, ScholarlyError, SemanticScholarClient,
};
use mockito::{Matcher, Server, ServerGuard};
use std::sync::Arc;

fn config_for(server: &ServerGuard) -> ScholarlyConfig {
    ScholarlyConfig {
        crossref_url: format!("{}/works", server.url()),
        semantic_scholar_url: format!("{}/graph/v1/paper/search", server.url()),
        doi_resolver_url: server.url(),
        rate_limit_backoff_ms: 1,
        ..ScholarlyConfig::default()
    }
}

const CROSSREF_BODY: &str = r#"{
    "status": "ok",
    "message": {
        "items": [{
            "title": ["Deep learning"],
            "DOI": "10.1038/nature14539",
            "published-print": {"date-parts": [[2015, 5, 28]]},
            "abstract": "<jats:p>Deep learning allows computational models to learn representations.</jats:p>"
        }]
    }
}"#;

const SEMANTIC_SCHOLAR_BODY: &str = r#"{
    "total": 1,
    "data": [{
        "paperId": "204e3073870fae3d05bcbc2f6a8e263d9b72e776",
        "title": "Attention is All you Need",
        "year": 2017,
        "abstract": null,
        "externalIds": {"DOI": "10.48550/arXiv.1706.03762"}
    }]
}"#;

#[tokio::test]
async fn test_crossref_search_decodes_items() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/works")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "LeCun et al., 2015".into()),
            Matcher::UrlEncoded("rows".into(), "1".into()),
            Matcher::UrlEncoded("mailto".into(), "aihc.project@example.com".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CROSSREF_BODY)
        .create_async()
        .await;

    let client = CrossrefClient::new(&config_for(&server)).unwrap();
    let records = client.search("LeCun et al., 2015", 1).await.unwrap();

    mock.assert_async().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source, RecordSource::Crossref);
    assert_eq!(records[0].year, Some(2015));
    assert_eq!(
        records[0].evidence_text().as_deref(),
        Some("Deep learning allows computational models to learn representations.")
    );
}

#[tokio::test]
async fn test_semantic_scholar_gives_up_after_three_rate_limits() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/graph/v1/paper/search")
        .match_query(Matcher::Any)
        .with_status(429)
        .expect(3)
        .create_async()
        .await;

    let client = SemanticScholarClient::new(&config_for(&server)).unwrap();
    let result = client.search("anything", 5).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ScholarlyError::RateLimited { attempts: 3 })));
}

#[tokio::test]
async fn test_semantic_scholar_requests_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/graph/v1/paper/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("fields".into(), "title,abstract,year,externalIds".into()),
        ]))
        .with_status(200)
        .with_body(SEMANTIC_SCHOLAR_BODY)
        .create_async()
        .await;

    let client = SemanticScholarClient::new(&config_for(&server)).unwrap();
    let records = client.search("attention", 5).await.unwrap();

    mock.assert_async().await;
    assert_eq!(records[0].doi(), Some("10.48550/arXiv.1706.03762"));
    assert_eq!(records[0].evidence_text().as_deref(), Some("Attention is All you Need"));
}

#[tokio::test]
async fn test_retrieval_survives_rate_limited_source() {
    let mut server = Server::new_async().await;
    let _crossref = server
        .mock("GET", "/works")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(CROSSREF_BODY)
        .create_async()
        .await;
    let _scholar = server
        .mock("GET", "/graph/v1/paper/search")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let config = config_for(&server);
    let sources: Vec<Arc<dyn MetadataSource>> = vec![
        Arc::new(CrossrefClient::new(&config).unwrap()),
        Arc::new(SemanticScholarClient::new(&config).unwrap()),
    ];
    let evidence = EvidenceRetriever::new(sources)
        .search_evidence("deep learning models learn representations")
        .await;

    assert_eq!(evidence.items.len(), 1);
    assert_eq!(evidence.skipped_count(), 1);
    assert_eq!(evidence.skipped[0].item, "semantic_scholar");
}

#[tokio::test]
async fn test_validator_falls_back_and_resolves_doi() {
    let mut server = Server::new_async().await;
    let crossref = server
        .mock("GET", "/works")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;
    let scholar = server
        .mock("GET", "/graph/v1/paper/search")
        .match_query(Matcher::UrlEncoded("limit".into(), "1".into()))
        .with_status(200)
        .with_body(SEMANTIC_SCHOLAR_BODY)
        .create_async()
        .await;
    let resolver = server
        .mock("GET", "/10.48550/arXiv.1706.03762")
        .with_status(200)
        .create_async()
        .await;

    let config = config_for(&server);
    let validator = CitationValidator::new(
        Arc::new(CrossrefClient::new(&config).unwrap()),
        Arc::new(SemanticScholarClient::new(&config).unwrap()),
        &config,
    )
    .unwrap();

    let report = validator.validate("Vaswani et al., 2017").await;

    crossref.assert_async().await;
    scholar.assert_async().await;
    resolver.assert_async().await;
    assert!(report.exists);
    assert!(report.metadata_complete);
    assert!(report.semantic_valid);
    assert!(report.link_valid);
    assert!(report.issues.is_empty());
}

#[tokio::test]
async fn test_validator_flags_unreachable_doi_and_placeholder_author() {
    let mut server = Server::new_async().await;
    let _crossref = server
        .mock("GET", "/works")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(CROSSREF_BODY)
        .create_async()
        .await;
    let _resolver = server
        .mock("GET", "/10.1038/nature14539")
        .with_status(404)
        .create_async()
        .await;

    let config = config_for(&server);
    let validator = CitationValidator::new(
        Arc::new(CrossrefClient::new(&config).unwrap()),
        Arc::new(SemanticScholarClient::new(&config).unwrap()),
        &config,
    )
    .unwrap();

    let report = validator.validate("Anonymous, A. (2015)").await;

    assert!(report.exists);
    assert!(report.metadata_complete);
    assert!(!report.semantic_valid);
    assert!(!report.link_valid);
    assert_eq!(report.issues, vec![ISSUE_SUSPICIOUS, ISSUE_LINK_UNREACHABLE]);
}
