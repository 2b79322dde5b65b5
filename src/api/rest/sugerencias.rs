use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::post;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::suggest::autocomplete::MIN_QUERY_CHARS;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/direcciones/sugerencias", post(sugerencias))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SugerenciasRequest {
    partial_address: String,
}

#[derive(Serialize)]
struct SugerenciasResponse {
    suggestions: Vec<String>,
}

/// Always answers 200: suggestion failure degrades to an empty list and must
/// never block the caller from typing a manual address.
async fn sugerencias(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SugerenciasRequest>,
) -> Json<SugerenciasResponse> {
    if payload.partial_address.chars().count() < MIN_QUERY_CHARS {
        state
            .metrics
            .suggestion_lookups_total
            .with_label_values(&["skipped"])
            .inc();
        return Json(SugerenciasResponse {
            suggestions: Vec::new(),
        });
    }

    let start = Instant::now();
    let suggestions = state.suggester.suggest(&payload.partial_address).await;
    let outcome = if suggestions.is_empty() { "empty" } else { "ok" };

    state
        .metrics
        .suggestion_latency_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .suggestion_lookups_total
        .with_label_values(&[outcome])
        .inc();

    Json(SugerenciasResponse { suggestions })
}
