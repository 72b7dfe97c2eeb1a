//! OpenAPI document for the HTTP surface.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::analysis_routes::AnalysisResponse;
use crate::home_routes::HealthResponse;
use crate::{AppState, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bolsa Advisor API",
        description = "Análisis técnico y fundamental de acciones con recomendación de inversión",
        version = "0.1.0"
    ),
    tags(
        (name = "Analysis", description = "Symbol analysis over the six-month window"),
        (name = "Health", description = "Service liveness"),
    ),
    components(schemas(AnalysisResponse, ErrorResponse, HealthResponse)),
    paths(
        crate::analysis_routes::analyze_stock,
        crate::home_routes::health,
    )
)]
pub struct ApiDoc;

pub fn docs_routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(serve_openapi))
}

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("Bolsa Advisor API"));
        assert!(json.contains("/api/analizar"));
        assert!(json.contains("/health"));
        assert!(json.contains("AnalysisResponse"));
        assert!(json.contains("ErrorResponse"));
    }
}
