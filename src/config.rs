//! Service configuration
//!
//! Layered the same way for every section: serde defaults, then an optional
//! TOML file, then `AUDITOR__SECTION__FIELD` environment variables, then the
//! well-known provider variables (`GROQ_API_KEY`, `HF_API_TOKEN`, ...).

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use crate::error::Result;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scholarly: ScholarlyConfig,
    #[serde(default)]
    pub nli: NliConfig,
}

impl Config {
    /// Load configuration from an optional file plus the environment
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config: Config = builder
            .add_source(
                config::Environment::with_prefix("AUDITOR")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config.from_env())
    }

    /// Apply provider-specific environment variables
    pub fn from_env(mut self) -> Self {
        self.llm = self.llm.from_env();
        self.nli = self.nli.from_env();
        self.scholarly = self.scholarly.from_env();

        if let Ok(val) = std::env::var("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }

        self
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_cors_origins() -> Vec<String> { vec!["http://localhost:3000".to_string()] }
fn default_max_body_bytes() -> usize { 1024 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// LLM completion service configuration (OpenAI-compatible)
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default)]
    pub temperature: f32,

    /// No timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_llm_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}
fn default_llm_model() -> String { "llama-3.3-70b-versatile".to_string() }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: None,
            temperature: 0.0,
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("GROQ_API_KEY") {
            self.api_key = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.model = val;
        }

        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Web search tool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_external_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of planned queries executed per audit
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,
}

fn default_search_endpoint() -> String { "https://api.duckduckgo.com/".to_string() }
fn default_external_timeout_secs() -> u64 { 10 }
fn default_max_queries() -> usize { 5 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            timeout_secs: default_external_timeout_secs(),
            max_queries: default_max_queries(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// CrossRef, Semantic Scholar and DOI resolver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarlyConfig {
    #[serde(default = "default_crossref_url")]
    pub crossref_url: String,

    #[serde(default = "default_semantic_scholar_url")]
    pub semantic_scholar_url: String,

    #[serde(default = "default_doi_resolver_url")]
    pub doi_resolver_url: String,

    /// Contact address sent to CrossRef's polite pool
    #[serde(default = "default_mailto")]
    pub mailto: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub semantic_scholar_api_key: Option<SecretString>,

    #[serde(default = "default_external_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts made against a rate-limited Semantic Scholar
    #[serde(default = "default_rate_limit_attempts")]
    pub rate_limit_attempts: u32,

    /// Base backoff, multiplied by the attempt number
    #[serde(default = "default_rate_limit_backoff_ms")]
    pub rate_limit_backoff_ms: u64,
}

fn default_crossref_url() -> String { "https://api.crossref.org/works".to_string() }
fn default_semantic_scholar_url() -> String {
    "https://api.semanticscholar.org/graph/v1/paper/search".to_string()
}
fn default_doi_resolver_url() -> String { "https://doi.org".to_string() }
fn default_mailto() -> String { "aihc.project@example.com".to_string() }
fn default_user_agent() -> String { "citation-auditor/0.1 (academic-project)".to_string() }
fn default_rate_limit_attempts() -> u32 { 3 }
fn default_rate_limit_backoff_ms() -> u64 { 2000 }

impl Default for ScholarlyConfig {
    fn default() -> Self {
        Self {
            crossref_url: default_crossref_url(),
            semantic_scholar_url: default_semantic_scholar_url(),
            doi_resolver_url: default_doi_resolver_url(),
            mailto: default_mailto(),
            user_agent: default_user_agent(),
            semantic_scholar_api_key: None,
            timeout_secs: default_external_timeout_secs(),
            rate_limit_attempts: default_rate_limit_attempts(),
            rate_limit_backoff_ms: default_rate_limit_backoff_ms(),
        }
    }
}

impl ScholarlyConfig {
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("SEMANTIC_SCHOLAR_API_KEY") {
            self.semantic_scholar_api_key = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("CROSSREF_MAILTO") {
            self.mailto = val;
        }

        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }
}

/// Zero-shot NLI classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NliConfig {
    #[serde(default = "default_nli_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub api_token: Option<SecretString>,

    #[serde(default = "default_hypothesis_template")]
    pub hypothesis_template: String,

    #[serde(default = "default_nli_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_nli_endpoint() -> String {
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli".to_string()
}
fn default_hypothesis_template() -> String { "This evidence {} the claim.".to_string() }
fn default_nli_timeout_secs() -> u64 { 30 }

impl Default for NliConfig {
    fn default() -> Self {
        Self {
            endpoint: default_nli_endpoint(),
            api_token: None,
            hypothesis_template: default_hypothesis_template(),
            timeout_secs: default_nli_timeout_secs(),
        }
    }
}

impl NliConfig {
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("HF_API_TOKEN") {
            self.api_token = Some(SecretString::new(val));
        }

        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
