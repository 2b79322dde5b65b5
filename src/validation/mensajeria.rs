use serde::Deserialize;

use crate::models::solicitud::{Detalle, Dimensiones, MensajeriaDetalle, ServiceType};
use crate::validation::{
    FieldError, NumeroEntrada, fecha_local, numero_positivo, requerir_texto,
};

/// Courier request form input, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MensajeriaDraft {
    pub sender_name: String,
    pub sender_phone: String,
    pub origin_address: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub destination_address: String,
    pub package_description: String,
    pub service_type: String,
    pub peso: Option<NumeroEntrada>,
    pub dimensiones_ancho: Option<NumeroEntrada>,
    pub dimensiones_alto: Option<NumeroEntrada>,
    pub dimensiones_largo: Option<NumeroEntrada>,
    pub fecha_recoleccion_deseada: String,
}

pub fn validar_mensajeria(draft: &MensajeriaDraft) -> Result<Detalle, Vec<FieldError>> {
    let mut errors = Vec::new();

    requerir_texto(
        &mut errors,
        "senderName",
        &draft.sender_name,
        2,
        "El nombre del remitente es requerido.",
    );
    requerir_texto(
        &mut errors,
        "senderPhone",
        &draft.sender_phone,
        7,
        "El teléfono del remitente es requerido.",
    );
    requerir_texto(
        &mut errors,
        "originAddress",
        &draft.origin_address,
        10,
        "La dirección de origen es requerida.",
    );
    requerir_texto(
        &mut errors,
        "recipientName",
        &draft.recipient_name,
        2,
        "El nombre del destinatario es requerido.",
    );
    requerir_texto(
        &mut errors,
        "recipientPhone",
        &draft.recipient_phone,
        7,
        "El teléfono del destinatario es requerido.",
    );
    requerir_texto(
        &mut errors,
        "destinationAddress",
        &draft.destination_address,
        10,
        "La dirección de destino es requerida.",
    );
    requerir_texto(
        &mut errors,
        "packageDescription",
        &draft.package_description,
        5,
        "La descripción del paquete es requerida.",
    );

    let service_type = match draft.service_type.as_str() {
        "standard" => Some(ServiceType::Standard),
        "express" => Some(ServiceType::Express),
        _ => {
            errors.push(FieldError::new(
                "serviceType",
                "Debe seleccionar un tipo de servicio.",
            ));
            None
        }
    };

    let peso = numero_positivo(
        &mut errors,
        "peso",
        draft.peso.as_ref(),
        "El peso debe ser un número positivo.",
    );
    let ancho = numero_positivo(
        &mut errors,
        "dimensionesAncho",
        draft.dimensiones_ancho.as_ref(),
        "El ancho debe ser positivo.",
    );
    let alto = numero_positivo(
        &mut errors,
        "dimensionesAlto",
        draft.dimensiones_alto.as_ref(),
        "El alto debe ser positivo.",
    );
    let largo = numero_positivo(
        &mut errors,
        "dimensionesLargo",
        draft.dimensiones_largo.as_ref(),
        "El largo debe ser positivo.",
    );

    // Dimensions attach only when all three are present; a partial set is
    // silently dropped, never an error.
    let dimensiones = match (ancho, alto, largo) {
        (Some(ancho), Some(alto), Some(largo)) => Some(Dimensiones { ancho, alto, largo }),
        _ => None,
    };

    let fecha_recoleccion = fecha_local(
        &mut errors,
        "fechaRecoleccionDeseada",
        &draft.fecha_recoleccion_deseada,
        "La fecha de recolección es requerida.",
    );

    match (service_type, fecha_recoleccion, errors.is_empty()) {
        (Some(service_type), Some(fecha_recoleccion_deseada), true) => {
            Ok(Detalle::Mensajeria(MensajeriaDetalle {
                sender_name: draft.sender_name.clone(),
                sender_phone: draft.sender_phone.clone(),
                origen: draft.origin_address.clone(),
                recipient_name: draft.recipient_name.clone(),
                recipient_phone: draft.recipient_phone.clone(),
                destino: draft.destination_address.clone(),
                descripcion_paquete: draft.package_description.clone(),
                service_type,
                peso,
                dimensiones,
                fecha_recoleccion_deseada,
            }))
        }
        _ => Err(errors),
    }
}
