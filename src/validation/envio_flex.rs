use serde::Deserialize;

use crate::models::solicitud::{Detalle, EnvioFlexDetalle, PuntoEntrega};
use crate::validation::{FieldError, requerir_texto, texto_opcional};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PuntoEntregaDraft {
    pub address: String,
    pub descripcion_paquete: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

/// Multi-stop flex shipping form input, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvioFlexDraft {
    pub origin_address: String,
    pub delivery_points: Vec<PuntoEntregaDraft>,
    pub shipping_preferences: Option<String>,
    pub requiere_confirmacion_entrega: Option<bool>,
}

pub fn validar_envio_flex(draft: &EnvioFlexDraft) -> Result<Detalle, Vec<FieldError>> {
    let mut errors = Vec::new();

    requerir_texto(
        &mut errors,
        "originAddress",
        &draft.origin_address,
        10,
        "La dirección de origen es requerida.",
    );

    // An empty stop list fails at the array level with one aggregate error,
    // not one error per missing element.
    if draft.delivery_points.is_empty() {
        errors.push(FieldError::new(
            "deliveryPoints",
            "Se requiere al menos un punto de entrega.",
        ));
    }

    let mut puntos = Vec::with_capacity(draft.delivery_points.len());
    for (index, punto) in draft.delivery_points.iter().enumerate() {
        puntos.push(validar_punto(&mut errors, index, punto));
    }

    let ventana = texto_opcional(
        &mut errors,
        "shippingPreferences",
        draft.shipping_preferences.as_deref(),
        1,
        "Las preferencias no son válidas.",
    );

    if errors.is_empty() {
        Ok(Detalle::EnvioFlex(EnvioFlexDetalle {
            origin_address: draft.origin_address.clone(),
            puntos_entrega: puntos.into_iter().flatten().collect(),
            ventana_horaria_preferida: ventana,
            requiere_confirmacion_entrega: draft.requiere_confirmacion_entrega,
        }))
    } else {
        Err(errors)
    }
}

fn validar_punto(
    errors: &mut Vec<FieldError>,
    index: usize,
    punto: &PuntoEntregaDraft,
) -> Option<PuntoEntrega> {
    let before = errors.len();

    requerir_texto(
        errors,
        &format!("deliveryPoints[{index}].address"),
        &punto.address,
        10,
        "La dirección es requerida.",
    );
    requerir_texto(
        errors,
        &format!("deliveryPoints[{index}].descripcionPaquete"),
        &punto.descripcion_paquete,
        5,
        "La descripción del paquete es requerida.",
    );

    let contact_name = texto_opcional(
        errors,
        &format!("deliveryPoints[{index}].contactName"),
        punto.contact_name.as_deref(),
        2,
        "El nombre de contacto es requerido.",
    );
    let contact_phone = texto_opcional(
        errors,
        &format!("deliveryPoints[{index}].contactPhone"),
        punto.contact_phone.as_deref(),
        7,
        "El teléfono de contacto es requerido.",
    );

    if errors.len() > before {
        return None;
    }

    Some(PuntoEntrega {
        direccion: punto.address.clone(),
        descripcion_paquete: punto.descripcion_paquete.clone(),
        contact_name,
        contact_phone,
    })
}
