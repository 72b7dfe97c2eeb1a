//! Landing page and health probe.

use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use stock_analyzer::SUGGESTED_SYMBOLS;

use crate::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

pub fn home_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

/// Landing page with usage hints and the suggested symbol table.
pub async fn home() -> Html<String> {
    let rows: String = SUGGESTED_SYMBOLS
        .iter()
        .map(|(alias, listing)| {
            format!("        <tr><td>{}</td><td>{}</td></tr>\n", alias, listing)
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <title>Analizador de Acciones</title>
</head>
<body>
    <h1>Analizador de Acciones</h1>
    <p>Consulta <code>/api/analizar?simbolo=WALMEX&amp;mercado=BMV</code> para obtener
    el análisis de una acción, o usa uno de los símbolos sugeridos:</p>
    <table>
        <tr><th>Alias</th><th>Símbolo</th></tr>
{rows}    </table>
</body>
</html>
"#
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
