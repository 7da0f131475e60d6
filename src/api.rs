//! # API Server Module
//!
//! ## Purpose
//! REST API server exposing the case law assistant: query search with the
//! clarity gate, actionable report generation, and system endpoints.
//!
//! ## Input/Output Specification
//! - **Input**: HTTP requests with officer queries and jurisdiction filters
//! - **Output**: JSON responses with case summaries, clarifications, reports
//! - **Endpoints**: Search, report generation, jurisdictions, health, index
//!
//! ## Key Features
//! - CORS support for web frontends
//! - Concurrent per-case summarization, joined before responding
//! - Clarification and results are mutually exclusive in a response
//! - Structured error responses

use crate::clarity::{self, Clarification};
use crate::errors::{AssistError, Result};
use crate::ranking;
use crate::report::{self, Report, ReportModel};
use crate::summary::{self, CaseSummary, SummaryModel};
use crate::{AppState, Jurisdiction};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};

/// API server wrapping the shared application state
pub struct ApiServer {
    app_state: AppState,
}

/// Search request payload
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
}

/// Search response payload. Carries either a clarification or results,
/// never both.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub results: Vec<CaseSummary>,
    pub total_results: usize,
    pub processing_time: f64,
    pub jurisdiction_filter: Jurisdiction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification: Option<Clarification>,
}

/// Report request payload
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub query: String,
    pub case_results: Vec<CaseSummary>,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
}

/// Entry in the jurisdictions listing
#[derive(Debug, Serialize)]
pub struct JurisdictionEntry {
    pub value: Jurisdiction,
    pub label: &'static str,
}

impl ApiServer {
    /// Create new API server
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    /// Run the API server
    pub async fn run(self) -> Result<()> {
        let bind_addr = format!(
            "{}:{}",
            self.app_state.config.server.host, self.app_state.config.server.port
        );

        tracing::info!("Starting API server on {}", bind_addr);

        let app_state = self.app_state;
        // Detach the `Server` future from the `HttpServer` builder before
        // awaiting; the builder itself is not `Send`, and `run()` must stay
        // spawnable onto the runtime.
        let server = HttpServer::new(move || {
            let server_config = &app_state.config.server;
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header()
                .supports_credentials();
            if server_config.enable_cors {
                for origin in &server_config.cors_origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            App::new()
                .app_data(web::Data::new(app_state.clone()))
                .wrap(cors)
                .route("/search", web::post().to(search_handler))
                .route("/generate-report", web::post().to(report_handler))
                .route("/jurisdictions", web::get().to(jurisdictions_handler))
                .route("/health", web::get().to(health_handler))
                .route("/", web::get().to(index_handler))
        })
        .bind(&bind_addr)
        .map_err(|e| AssistError::Internal {
            message: format!("Failed to bind server to {}: {}", bind_addr, e),
        })?
        .run();

        server.await.map_err(|e| AssistError::Internal {
            message: format!("Server error: {}", e),
        })?;

        Ok(())
    }
}

/// Search endpoint handler: clarity gate, ranking, concurrent summarization.
async fn search_handler(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    let start_time = std::time::Instant::now();
    let jurisdiction = request.jurisdiction.unwrap_or_default();

    // Vague queries short-circuit with refinement suggestions
    if let Some(clarification) = clarity::classify(
        &request.query,
        app_state.config.search.max_suggestions,
    ) {
        tracing::info!(query = %request.query, "Query flagged as vague, requesting clarification");
        return Ok(HttpResponse::Ok().json(QueryResponse {
            query: request.query.clone(),
            results: Vec::new(),
            total_results: 0,
            processing_time: round_seconds(start_time.elapsed().as_secs_f64()),
            jurisdiction_filter: jurisdiction,
            clarification: Some(clarification),
        }));
    }

    let scored = ranking::rank(
        &request.query,
        jurisdiction,
        &app_state.corpus,
        app_state.config.search.default_max_results,
    );

    // Summaries are independent; issue the generative calls concurrently and
    // join before responding. Order follows the ranking.
    let model = SummaryModel::from(&app_state.config.generative);
    let results = futures::future::join_all(scored.iter().map(|case| {
        summary::summarize(
            case,
            &request.query,
            jurisdiction,
            &app_state.generative,
            &model,
        )
    }))
    .await;

    let total_results = results.len();
    tracing::info!(
        query = %request.query,
        jurisdiction = %jurisdiction,
        total_results,
        "Search completed"
    );

    Ok(HttpResponse::Ok().json(QueryResponse {
        query: request.query.clone(),
        results,
        total_results,
        processing_time: round_seconds(start_time.elapsed().as_secs_f64()),
        jurisdiction_filter: jurisdiction,
        clarification: None,
    }))
}

/// Report endpoint handler
async fn report_handler(
    app_state: web::Data<AppState>,
    request: web::Json<ReportRequest>,
) -> ActixResult<HttpResponse> {
    let jurisdiction = request.jurisdiction.unwrap_or_default();
    let model = ReportModel::from(&app_state.config.generative);

    let report: Report = report::build_report(
        &request.query,
        &request.case_results,
        jurisdiction,
        &app_state.generative,
        &model,
    )
    .await;

    Ok(HttpResponse::Ok().json(report))
}

/// Jurisdictions listing handler
async fn jurisdictions_handler() -> ActixResult<HttpResponse> {
    let jurisdictions: Vec<JurisdictionEntry> = Jurisdiction::all_filters()
        .into_iter()
        .map(|j| JurisdictionEntry {
            value: j,
            label: j.label(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "jurisdictions": jurisdictions })))
}

/// Health check endpoint handler
async fn health_handler(app_state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "corpus_size": app_state.corpus.len(),
        "generative": if app_state.generative.is_available() { "available" } else { "unavailable" },
    })))
}

/// Index page handler
async fn index_handler() -> ActixResult<HttpResponse> {
    let html = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Case Law Assistant</title>
        <style>
            body { font-family: Arial, sans-serif; margin: 40px; }
            .header { color: #2c3e50; }
            .endpoint { margin: 20px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }
            .method { font-weight: bold; color: #27ae60; }
        </style>
    </head>
    <body>
        <h1 class="header">Case Law Assistant API</h1>
        <p>Answers natural-language legal queries from police officers with relevant
        precedent summaries and actionable guidance.</p>

        <h2>Available Endpoints</h2>

        <div class="endpoint">
            <span class="method">POST</span> /search
            <p>Search precedent cases with a natural-language query and jurisdiction filter.</p>
        </div>

        <div class="endpoint">
            <span class="method">POST</span> /generate-report
            <p>Aggregate previously returned case summaries into an actionable report.</p>
        </div>

        <div class="endpoint">
            <span class="method">GET</span> /jurisdictions
            <p>List the jurisdictions available for filtering.</p>
        </div>

        <div class="endpoint">
            <span class="method">GET</span> /health
            <p>Check service health and generative availability.</p>
        </div>

        <h2>Example Search Request</h2>
        <pre>{
  "query": "vehicle search during traffic stop",
  "jurisdiction": "federal"
}</pre>
    </body>
    </html>
    "#;

    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

fn round_seconds(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::corpus::Corpus;
    use crate::Generative;
    use actix_web::{test, App};
    use std::sync::Arc;

    fn state() -> AppState {
        AppState {
            config: Arc::new(Config::default()),
            corpus: Arc::new(Corpus::load()),
            generative: Generative::Unavailable,
        }
    }

    #[::core::prelude::v1::test]
    fn server_run_future_is_spawnable() {
        // `ApiServer::run` must produce a `Send` future so main can hand it
        // to `tokio::spawn`.
        fn assert_send<T: Send>(_fut: T) {}
        assert_send(ApiServer::new(state()).run());
    }

    #[actix_web::test]
    async fn vague_query_returns_clarification_without_results() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .route("/search", web::post().to(search_handler)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({"query": "search"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_results"], 0);
        assert!(body["results"].as_array().unwrap().is_empty());
        assert_eq!(body["clarification"]["needs_clarification"], true);
        assert_eq!(body["clarification"]["original_query"], "search");
        assert!(body["clarification"]["suggested_refinements"].as_array().unwrap().len() <= 4);
    }

    #[actix_web::test]
    async fn specific_query_returns_fallback_summaries() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .route("/search", web::post().to(search_handler)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({
                "query": "pat down search during stop",
                "jurisdiction": "federal"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(body.get("clarification").is_none());
        let results = body["results"].as_array().unwrap();
        assert!(!results.is_empty());
        assert_eq!(body["total_results"], results.len());
        assert_eq!(body["jurisdiction_filter"], "federal");
        // Unavailable generative service: summaries come from the template
        assert!(results[0]["summary"].as_str().unwrap().starts_with("In "));
        assert_eq!(results[0]["key_takeaways"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn report_endpoint_returns_fallback_report() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .route("/generate-report", web::post().to(report_handler)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-report")
            .set_json(serde_json::json!({
                "query": "traffic stop",
                "case_results": [],
                "jurisdiction": "new_jersey"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["query"], "traffic stop");
        assert_eq!(body["key_insights"].as_array().unwrap().len(), 1);
        assert_eq!(body["procedural_recommendations"].as_array().unwrap().len(), 3);
        assert_eq!(body["legal_warnings"].as_array().unwrap().len(), 2);
        assert_eq!(body["jurisdiction_specific_notes"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn jurisdictions_listing_is_complete() {
        let app = test::init_service(
            App::new().route("/jurisdictions", web::get().to(jurisdictions_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/jurisdictions").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let entries = body["jurisdictions"].as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["value"], "all");
        assert_eq!(entries[0]["label"], "All Jurisdictions");
    }
}
