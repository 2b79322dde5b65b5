use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use solicitudes_service::api::rest::router;
use solicitudes_service::state::AppState;
use solicitudes_service::store::SolicitudGateway;
use solicitudes_service::suggest::{AddressSuggester, SuggestError, SuggestionBackend};
use tower::ServiceExt;

struct StubBackend {
    calls: AtomicUsize,
}

impl StubBackend {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SuggestionBackend for StubBackend {
    async fn complete(&self, partial_address: &str) -> Result<Vec<String>, SuggestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![format!("{partial_address} 1234, Montevideo")])
    }
}

fn setup() -> (axum::Router, Arc<StubBackend>) {
    let backend = Arc::new(StubBackend::new());
    let state = AppState::new(
        SolicitudGateway::in_memory(),
        AddressSuggester::new(backend.clone()),
    );
    (router(Arc::new(state)), backend)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn mensajeria_payload() -> Value {
    json!({
        "senderName": "Juan Pérez",
        "senderPhone": "3001234567",
        "originAddress": "Av. Italia 1234, Montevideo",
        "recipientName": "Ana López",
        "recipientPhone": "3017654321",
        "destinationAddress": "Colonia 900, Montevideo",
        "packageDescription": "Documentos legales",
        "serviceType": "express",
        "fechaRecoleccionDeseada": "2025-06-01T14:00"
    })
}

fn delivery_payload() -> Value {
    json!({
        "pickupAddress": "Av. Italia 1234, Montevideo",
        "contactNamePickup": "Carlos Ruiz",
        "contactPhonePickup": "3009876543",
        "deliveryAddress": "18 de Julio 1500, Montevideo",
        "contactNameDelivery": "María Gómez",
        "contactPhoneDelivery": "3001112233",
        "packageDetails": "Caja mediana",
        "fechaEntregaDeseada": "2025-06-02T10:00"
    })
}

fn flex_payload() -> Value {
    json!({
        "originAddress": "Bulevar Artigas 400, Montevideo",
        "deliveryPoints": [
            {
                "address": "Rivera 2100, Montevideo",
                "descripcionPaquete": "Sobre con documentos"
            }
        ],
        "requiereConfirmacionEntrega": true
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _backend) = setup();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn metrics_returns_prometheus_format() {
    let (app, _backend) = setup();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/solicitudes/delivery",
            delivery_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get_request("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("solicitudes_created_total"));
}

#[tokio::test]
async fn create_mensajeria_defaults_to_pendiente() {
    let (app, _backend) = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/solicitudes/mensajeria",
            mensajeria_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["tipo"], "mensajeria");
    assert_eq!(body["estado"], "Pendiente");
    assert_eq!(body["senderName"], "Juan Pérez");
    assert_eq!(body["serviceType"], "express");
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert!(body.get("fechaCreacion").is_some());
    assert!(body.get("peso").is_none());
    assert!(body.get("dimensiones").is_none());
}

#[tokio::test]
async fn create_collects_all_field_errors() {
    let (app, _backend) = setup();
    let mut payload = mensajeria_payload();
    payload["senderName"] = json!("J");
    payload["recipientPhone"] = json!("123");

    let response = app
        .oneshot(json_request("POST", "/solicitudes/mensajeria", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields.len(), 2);
    assert!(fields.contains(&"senderName"));
    assert!(fields.contains(&"recipientPhone"));
}

#[tokio::test]
async fn partial_dimensions_are_dropped_not_rejected() {
    let (app, _backend) = setup();
    let mut payload = mensajeria_payload();
    payload["dimensionesAncho"] = json!("30");
    payload["dimensionesAlto"] = json!("20");
    // largo omitted on purpose

    let response = app
        .oneshot(json_request("POST", "/solicitudes/mensajeria", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(body.get("dimensiones").is_none());
}

#[tokio::test]
async fn complete_dimensions_are_stored() {
    let (app, _backend) = setup();
    let mut payload = mensajeria_payload();
    payload["peso"] = json!("2.4");
    payload["dimensionesAncho"] = json!("30");
    payload["dimensionesAlto"] = json!("20");
    payload["dimensionesLargo"] = json!("15");

    let response = app
        .oneshot(json_request("POST", "/solicitudes/mensajeria", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["peso"], 2.4);
    assert_eq!(body["dimensiones"]["ancho"], 30.0);
    assert_eq!(body["dimensiones"]["largo"], 15.0);
}

#[tokio::test]
async fn flex_without_points_returns_aggregate_error() {
    let (app, _backend) = setup();
    let mut payload = flex_payload();
    payload["deliveryPoints"] = json!([]);

    let response = app
        .oneshot(json_request("POST", "/solicitudes/envios-flex", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["field"], "deliveryPoints");
}

#[tokio::test]
async fn flex_with_one_point_succeeds() {
    let (app, _backend) = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/solicitudes/envios-flex",
            flex_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["tipo"], "envio_flex");
    assert_eq!(body["puntosEntrega"].as_array().unwrap().len(), 1);
    assert_eq!(body["requiereConfirmacionEntrega"], true);
}

#[tokio::test]
async fn get_returns_what_create_stored() {
    let (app, _backend) = setup();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/solicitudes/delivery",
            delivery_payload(),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/solicitudes/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first, created);

    // Reads are idempotent.
    let response = app
        .oneshot(get_request(&format!("/solicitudes/{id}")))
        .await
        .unwrap();
    let second = body_json(response).await;
    assert_eq!(second, first);
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let (app, _backend) = setup();
    let response = app
        .oneshot(get_request("/solicitudes/no-such-id"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_requires_a_known_tipo() {
    let (app, _backend) = setup();
    let response = app
        .clone()
        .oneshot(get_request("/solicitudes?tipo=paqueteria"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get_request("/solicitudes?tipo=delivery"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_filters_by_tipo_newest_first() {
    let (app, _backend) = setup();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/solicitudes/delivery",
                delivery_payload(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/solicitudes/mensajeria",
            mensajeria_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get_request("/solicitudes?tipo=delivery"))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();

    assert_eq!(listed.len(), 2);
    for solicitud in listed {
        assert_eq!(solicitud["tipo"], "delivery");
    }
    let first = listed[0]["fechaCreacion"].as_str().unwrap();
    let second = listed[1]["fechaCreacion"].as_str().unwrap();
    assert!(first >= second);
}

#[tokio::test]
async fn spec_scenario_single_delivery_listing() {
    let (app, _backend) = setup();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/solicitudes/delivery",
            delivery_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get_request("/solicitudes?tipo=delivery"))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["estado"], "Pendiente");
    assert_eq!(listed[0]["direccionOrigen"], "Av. Italia 1234, Montevideo");
    assert_eq!(listed[0]["direccionDestino"], "18 de Julio 1500, Montevideo");
    assert_eq!(listed[0]["packageDetails"], "Caja mediana");
}

#[tokio::test]
async fn patch_updates_estado_but_never_tipo() {
    let (app, _backend) = setup();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/solicitudes/mensajeria",
            mensajeria_payload(),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/solicitudes/{id}"),
            json!({ "tipo": "delivery", "estado": "En Proceso" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["tipo"], "mensajeria");
    assert_eq!(body["estado"], "En Proceso");
    assert_eq!(body["fechaCreacion"], created["fechaCreacion"]);
}

#[tokio::test]
async fn patch_rejects_unknown_estado() {
    let (app, _backend) = setup();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/solicitudes/delivery",
            delivery_payload(),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/solicitudes/{id}"),
            json!({ "estado": "Archivado" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_unknown_id_returns_404() {
    let (app, _backend) = setup();
    let response = app
        .oneshot(json_request(
            "PATCH",
            "/solicitudes/no-such-id",
            json!({ "estado": "Cancelado" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_returns_404_and_delete_is_idempotent() {
    let (app, _backend) = setup();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/solicitudes/envios-flex",
            flex_payload(),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(delete_request(&format!("/solicitudes/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/solicitudes/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(delete_request(&format!("/solicitudes/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn short_partial_address_skips_the_backend() {
    let (app, backend) = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/direcciones/sugerencias",
            json!({ "partialAddress": "Av" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn partial_address_returns_ordered_suggestions() {
    let (app, backend) = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/direcciones/sugerencias",
            json!({ "partialAddress": "Av. Italia" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["suggestions"][0].as_str().unwrap(),
        "Av. Italia 1234, Montevideo"
    );
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}
