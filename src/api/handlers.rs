//! HTTP handlers

use super::ui::{self, PageBody};
use crate::citations::{CitationReport, CitationValidator};
use crate::claims::ClaimChecker;
use crate::error::Error;
use crate::metrics::METRICS;
use crate::nli::ClaimVerification;
use crate::pipeline::{AuditOutcome, FactCheckPipeline};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FactCheckPipeline>,
    pub validator: Arc<CitationValidator>,
    pub claims: Arc<ClaimChecker>,
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn validation_error(message: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new("VALIDATION_ERROR", message)),
    )
}

fn pipeline_error(e: Error) -> (StatusCode, Json<ApiError>) {
    match e {
        Error::Llm(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiError::new("UPSTREAM_ERROR", e.to_string())),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new("INTERNAL_ERROR", other.to_string())),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    info!("Health check endpoint called");
    Json(serde_json::json!({ "status": "healthy" }))
}

/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        METRICS.export_prometheus(),
    )
}

/// GET /
pub async fn index() -> Html<String> {
    Html(ui::render_page("", PageBody::Empty))
}

/// POST /audit (form)
pub async fn audit_form(State(state): State<AppState>, Form(form): Form<AuditRequest>) -> Html<String> {
    if form.query.trim().is_empty() {
        return Html(ui::render_page(&form.query, PageBody::Error(ui::EMPTY_INPUT_MESSAGE)));
    }

    match state.pipeline.audit(&form.query).await {
        Ok(outcome) => Html(ui::render_page(&form.query, PageBody::Outcome(&outcome))),
        Err(e) => {
            error!("Audit failed: {}", e);
            let message = format!("Audit failed: {}", e);
            Html(ui::render_page(&form.query, PageBody::Error(&message)))
        }
    }
}

/// POST /api/v1/audit
pub async fn audit(State(state): State<AppState>, Json(request): Json<AuditRequest>) -> ApiResult<AuditOutcome> {
    if request.query.trim().is_empty() {
        return Err(validation_error("Query cannot be empty"));
    }

    state
        .pipeline
        .audit(&request.query)
        .await
        .map(Json)
        .map_err(pipeline_error)
}

/// POST /api/v1/citations/validate
pub async fn validate_citations(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> ApiResult<Vec<CitationReport>> {
    if request.text.trim().is_empty() {
        return Err(validation_error("Text cannot be empty"));
    }

    Ok(Json(state.validator.validate_text(&request.text).await))
}

/// POST /api/v1/claims/verify
pub async fn verify_claims(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> ApiResult<Vec<ClaimVerification>> {
    if request.text.trim().is_empty() {
        return Err(validation_error("Text cannot be empty"));
    }

    Ok(Json(state.claims.check_claims(&request.text).await))
}
