//! Stock analysis endpoint.

use advisor_core::StockAnalysis;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState, ErrorResponse};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct AnalyzeQuery {
    /// Ticker or suggested alias (e.g. WALMEX, FEMSA).
    #[serde(default)]
    pub simbolo: Option<String>,
    /// Exchange code: BMV, NYSE, NASDAQ, LON or TSX.
    #[serde(default)]
    pub mercado: Option<String>,
}

/// Response contract consumed by the frontend; field names stay Spanish.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AnalysisResponse {
    pub simbolo: String,
    pub nombre_empresa: String,
    pub precio_actual: f64,
    pub rendimiento_periodo: f64,
    pub volumen_promedio: i64,
    pub precio_maximo: f64,
    pub precio_minimo: f64,
    pub precios: Vec<f64>,
    pub fechas: Vec<String>,
    pub descripcion: String,
    pub logo_url: String,
    pub recomendacion: String,
    pub nivel_riesgo: String,
    pub inversion_sugerida: String,
    pub razones_analisis: Vec<String>,
    pub score: u32,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl From<&StockAnalysis> for AnalysisResponse {
    fn from(analysis: &StockAnalysis) -> Self {
        AnalysisResponse {
            simbolo: analysis.symbol.clone(),
            nombre_empresa: analysis.company_name.clone(),
            precio_actual: round2(analysis.current_price),
            rendimiento_periodo: round2(analysis.period_return_pct),
            volumen_promedio: analysis.average_volume,
            precio_maximo: round2(analysis.period_high),
            precio_minimo: round2(analysis.period_low),
            precios: analysis.closes.clone(),
            fechas: analysis.dates.clone(),
            descripcion: analysis.description.clone(),
            logo_url: analysis.logo_url.clone(),
            recomendacion: analysis.recommendation.tier.label().to_string(),
            nivel_riesgo: analysis.recommendation.risk.label().to_string(),
            inversion_sugerida: analysis.recommendation.suggested_allocation.clone(),
            razones_analisis: analysis.recommendation.reasons.clone(),
            score: analysis.recommendation.score,
        }
    }
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/api/analizar", get(analyze_stock))
}

#[utoipa::path(
    get,
    path = "/api/analizar",
    params(AnalyzeQuery),
    responses(
        (status = 200, description = "Full analysis over the six-month window", body = AnalysisResponse),
        (status = 400, description = "Missing simbolo parameter", body = ErrorResponse),
        (status = 404, description = "No market data for the symbol", body = ErrorResponse),
        (status = 500, description = "Provider or analysis failure", body = ErrorResponse),
    ),
    tag = "Analysis"
)]
pub async fn analyze_stock(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let simbolo = query.simbolo.as_deref().unwrap_or("").trim();
    if simbolo.is_empty() {
        return Err(ApiError::BadRequest(
            "Por favor, proporciona un símbolo de acción.".to_string(),
        ));
    }

    let analysis = state
        .analyzer
        .analyze(simbolo, query.mercado.as_deref())
        .await?;

    Ok(Json(AnalysisResponse::from(&analysis)))
}
