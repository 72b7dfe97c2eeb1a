//! HTTP surface of the stock advisor.
//!
//! Exposes the analysis endpoint under `/api/analizar`, a landing page at
//! `/`, a health probe and the OpenAPI document. Wire-level text (error
//! messages, recommendation labels) is Spanish, matching the frontend the
//! service was built for.

use std::sync::Arc;

use advisor_core::AnalysisError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use stock_analyzer::StockAnalyzer;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use yahoo_client::YahooClient;

pub mod analysis_routes;
pub mod home_routes;
pub mod openapi;


/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<StockAnalyzer>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Body shape shared by every error status.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(detail) => {
                // Detail stays in the log, the client gets a generic message.
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error al analizar la acción. Por favor, verifica el símbolo y el mercado."
                        .to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::NotFound(symbol) => ApiError::NotFound(format!(
                "No se encontraron datos para el símbolo {}.",
                symbol
            )),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Assemble the application router around the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(home_routes::home_routes())
        .merge(analysis_routes::analysis_routes())
        .merge(openapi::docs_routes())
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Recurso no encontrado".to_string())
}

/// Binary entry point: environment, logging, state, then serve.
pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=info,stock_analyzer=info,yahoo_client=warn".into()),
        )
        .init();

    let provider = Arc::new(YahooClient::new());
    let state = AppState {
        analyzer: Arc::new(StockAnalyzer::new(provider)),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {}", addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
