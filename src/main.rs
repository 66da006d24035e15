use anyhow::Context;
use citation_auditor::{
    api::{build_router, AppState},
    citations::CitationValidator,
    claims::ClaimChecker,
    config::LoggingConfig,
    evidence::EvidenceRetriever,
    llm::{LanguageModel, OpenAiCompatibleClient},
    nli::{HttpZeroShotClassifier, NliVerifier},
    pipeline::FactCheckPipeline,
    scholarly::{CrossrefClient, MetadataSource, SemanticScholarClient},
    search::DuckDuckGoSearch,
    Config,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load(Some("config.toml")).context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!("Starting citation auditor v{}", env!("CARGO_PKG_VERSION"));

    if config.llm.api_key.is_none() {
        warn!("No LLM API key configured; audits will fail upstream");
    }

    let llm = OpenAiCompatibleClient::new(config.llm.clone()).context("Failed to build LLM client")?;
    info!("LLM model: {}", llm.model());
    let llm: Arc<dyn LanguageModel> = Arc::new(llm);

    let search = Arc::new(DuckDuckGoSearch::new(&config.search).context("Failed to build search client")?);
    let pipeline = FactCheckPipeline::new(llm, search, config.search.max_queries);

    let crossref: Arc<dyn MetadataSource> =
        Arc::new(CrossrefClient::new(&config.scholarly).context("Failed to build CrossRef client")?);
    let semantic_scholar: Arc<dyn MetadataSource> = Arc::new(
        SemanticScholarClient::new(&config.scholarly).context("Failed to build Semantic Scholar client")?,
    );

    let validator = CitationValidator::new(crossref.clone(), semantic_scholar.clone(), &config.scholarly)
        .context("Failed to build citation validator")?;

    let classifier =
        HttpZeroShotClassifier::new(config.nli.clone()).context("Failed to build NLI classifier")?;
    let verifier = NliVerifier::new(Arc::new(classifier), config.nli.hypothesis_template.clone());
    let retriever = EvidenceRetriever::new(vec![crossref, semantic_scholar]);
    let claims = ClaimChecker::new(Arc::new(retriever), Arc::new(verifier));

    let state = AppState {
        pipeline: Arc::new(pipeline),
        validator: Arc::new(validator),
        claims: Arc::new(claims),
    };
    let app = build_router(state, &config.server);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
