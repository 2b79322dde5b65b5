use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::AppError;
use crate::models::solicitud::{Detalle, Solicitud, Tipo};
use crate::state::AppState;
use crate::validation::{
    DeliveryDraft, EnvioFlexDraft, FieldError, MensajeriaDraft, validar_delivery,
    validar_envio_flex, validar_mensajeria,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/solicitudes/mensajeria", post(create_mensajeria))
        .route("/solicitudes/delivery", post(create_delivery))
        .route("/solicitudes/envios-flex", post(create_envio_flex))
        .route("/solicitudes", get(list_solicitudes))
        .route(
            "/solicitudes/:id",
            get(get_solicitud)
                .patch(update_solicitud)
                .delete(delete_solicitud),
        )
}

async fn create_mensajeria(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<MensajeriaDraft>,
) -> Result<(StatusCode, Json<Solicitud>), AppError> {
    create(state, Tipo::Mensajeria, validar_mensajeria(&draft)).await
}

async fn create_delivery(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<DeliveryDraft>,
) -> Result<(StatusCode, Json<Solicitud>), AppError> {
    create(state, Tipo::Delivery, validar_delivery(&draft)).await
}

async fn create_envio_flex(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<EnvioFlexDraft>,
) -> Result<(StatusCode, Json<Solicitud>), AppError> {
    create(state, Tipo::EnvioFlex, validar_envio_flex(&draft)).await
}

/// Validation always completes before any persistence call is issued.
async fn create(
    state: Arc<AppState>,
    tipo: Tipo,
    validated: Result<Detalle, Vec<FieldError>>,
) -> Result<(StatusCode, Json<Solicitud>), AppError> {
    let detalle = match validated {
        Ok(detalle) => detalle,
        Err(fields) => {
            state
                .metrics
                .validation_failures_total
                .with_label_values(&[tipo.as_str()])
                .inc();
            return Err(AppError::Validation(fields));
        }
    };

    let solicitud = state.gateway.create(detalle, None).await?;
    state
        .metrics
        .solicitudes_created_total
        .with_label_values(&[tipo.as_str()])
        .inc();
    info!(id = %solicitud.id, tipo = tipo.as_str(), "solicitud registered");

    Ok((StatusCode::CREATED, Json(solicitud)))
}

#[derive(Deserialize)]
struct ListQuery {
    tipo: String,
}

async fn list_solicitudes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Solicitud>>, AppError> {
    let tipo: Tipo = query
        .tipo
        .parse()
        .map_err(|_| AppError::BadRequest(format!("tipo desconocido: {}", query.tipo)))?;

    let solicitudes = state.gateway.list_by_tipo(tipo).await?;
    Ok(Json(solicitudes))
}

async fn get_solicitud(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Solicitud>, AppError> {
    let solicitud = state
        .gateway
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("solicitud {id} no existe")))?;

    Ok(Json(solicitud))
}

async fn update_solicitud(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Solicitud>, AppError> {
    let patch = match patch {
        Value::Object(fields) => fields,
        _ => {
            return Err(AppError::BadRequest(
                "el cuerpo debe ser un objeto JSON".to_string(),
            ));
        }
    };

    let updated = state.gateway.update(&id, patch).await?;
    Ok(Json(updated))
}

async fn delete_solicitud(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.gateway.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
