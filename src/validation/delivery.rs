use serde::Deserialize;

use crate::models::solicitud::{DeliveryDetalle, Detalle};
use crate::validation::{FieldError, fecha_local, requerir_texto, texto_opcional};

/// Point-to-point delivery form input, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryDraft {
    pub pickup_address: String,
    pub contact_name_pickup: String,
    pub contact_phone_pickup: String,
    pub delivery_address: String,
    pub contact_name_delivery: String,
    pub contact_phone_delivery: String,
    pub package_details: String,
    pub instrucciones_especiales: Option<String>,
    pub fecha_entrega_deseada: String,
}

pub fn validar_delivery(draft: &DeliveryDraft) -> Result<Detalle, Vec<FieldError>> {
    let mut errors = Vec::new();

    requerir_texto(
        &mut errors,
        "pickupAddress",
        &draft.pickup_address,
        10,
        "La dirección de recogida es requerida.",
    );
    requerir_texto(
        &mut errors,
        "contactNamePickup",
        &draft.contact_name_pickup,
        2,
        "El nombre de contacto en recogida es requerido.",
    );
    requerir_texto(
        &mut errors,
        "contactPhonePickup",
        &draft.contact_phone_pickup,
        7,
        "El teléfono de contacto en recogida es requerido.",
    );
    requerir_texto(
        &mut errors,
        "deliveryAddress",
        &draft.delivery_address,
        10,
        "La dirección de entrega es requerida.",
    );
    requerir_texto(
        &mut errors,
        "contactNameDelivery",
        &draft.contact_name_delivery,
        2,
        "El nombre de contacto en entrega es requerido.",
    );
    requerir_texto(
        &mut errors,
        "contactPhoneDelivery",
        &draft.contact_phone_delivery,
        7,
        "El teléfono de contacto en entrega es requerido.",
    );
    requerir_texto(
        &mut errors,
        "packageDetails",
        &draft.package_details,
        5,
        "Los detalles del paquete son requeridos.",
    );

    let instrucciones = texto_opcional(
        &mut errors,
        "instruccionesEspeciales",
        draft.instrucciones_especiales.as_deref(),
        1,
        "Las instrucciones no son válidas.",
    );

    let fecha_entrega = fecha_local(
        &mut errors,
        "fechaEntregaDeseada",
        &draft.fecha_entrega_deseada,
        "La fecha de entrega es requerida.",
    );

    match (fecha_entrega, errors.is_empty()) {
        (Some(fecha_entrega_deseada), true) => Ok(Detalle::Delivery(DeliveryDetalle {
            direccion_origen: draft.pickup_address.clone(),
            contact_name_pickup: draft.contact_name_pickup.clone(),
            contact_phone_pickup: draft.contact_phone_pickup.clone(),
            direccion_destino: draft.delivery_address.clone(),
            nombre_destinatario: draft.contact_name_delivery.clone(),
            telefono_destinatario: draft.contact_phone_delivery.clone(),
            package_details: draft.package_details.clone(),
            instrucciones_especiales: instrucciones,
            fecha_entrega_deseada,
        })),
        _ => Err(errors),
    }
}
