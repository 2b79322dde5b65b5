use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a request. Membership is validated wherever a status
/// enters the system; transition edges are deliberately not enforced, so any
/// of the four values may be written at any time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Estado {
    #[serde(rename = "Pendiente")]
    Pendiente,
    #[serde(rename = "En Proceso")]
    EnProceso,
    #[serde(rename = "Completado")]
    Completado,
    #[serde(rename = "Cancelado")]
    Cancelado,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tipo {
    #[serde(rename = "mensajeria")]
    Mensajeria,
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(rename = "envio_flex")]
    EnvioFlex,
}

impl Tipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tipo::Mensajeria => "mensajeria",
            Tipo::Delivery => "delivery",
            Tipo::EnvioFlex => "envio_flex",
        }
    }
}

impl std::str::FromStr for Tipo {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "mensajeria" => Ok(Tipo::Mensajeria),
            "delivery" => Ok(Tipo::Delivery),
            "envio_flex" => Ok(Tipo::EnvioFlex),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimensiones {
    pub ancho: f64,
    pub alto: f64,
    pub largo: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PuntoEntrega {
    pub direccion: String,
    pub descripcion_paquete: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "express")]
    Express,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MensajeriaDetalle {
    pub sender_name: String,
    pub sender_phone: String,
    pub origen: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub destino: String,
    pub descripcion_paquete: String,
    pub service_type: ServiceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensiones: Option<Dimensiones>,
    pub fecha_recoleccion_deseada: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetalle {
    pub direccion_origen: String,
    pub contact_name_pickup: String,
    pub contact_phone_pickup: String,
    pub direccion_destino: String,
    pub nombre_destinatario: String,
    pub telefono_destinatario: String,
    pub package_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrucciones_especiales: Option<String>,
    pub fecha_entrega_deseada: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvioFlexDetalle {
    pub origin_address: String,
    pub puntos_entrega: Vec<PuntoEntrega>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventana_horaria_preferida: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requiere_confirmacion_entrega: Option<bool>,
}

/// Variant payload of a request, discriminated by the `tipo` document field.
/// Exactly one variant's fields appear in a document; the others are absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "tipo")]
pub enum Detalle {
    #[serde(rename = "mensajeria")]
    Mensajeria(MensajeriaDetalle),
    #[serde(rename = "delivery")]
    Delivery(DeliveryDetalle),
    #[serde(rename = "envio_flex")]
    EnvioFlex(EnvioFlexDetalle),
}

impl Detalle {
    pub fn tipo(&self) -> Tipo {
        match self {
            Detalle::Mensajeria(_) => Tipo::Mensajeria,
            Detalle::Delivery(_) => Tipo::Delivery,
            Detalle::EnvioFlex(_) => Tipo::EnvioFlex,
        }
    }
}

/// Document payload as written to and read from the `solicitudes` collection.
/// The id lives in the storage key, never inside the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolicitudDoc {
    pub estado: Estado,
    #[serde(rename = "fechaCreacion")]
    pub fecha_creacion: DateTime<Utc>,
    #[serde(flatten)]
    pub detalle: Detalle,
}

/// A stored request joined with its storage key.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Solicitud {
    pub id: String,
    pub estado: Estado,
    #[serde(rename = "fechaCreacion")]
    pub fecha_creacion: DateTime<Utc>,
    #[serde(flatten)]
    pub detalle: Detalle,
}

impl Solicitud {
    pub fn from_doc(id: String, doc: SolicitudDoc) -> Self {
        Self {
            id,
            estado: doc.estado,
            fecha_creacion: doc.fecha_creacion,
            detalle: doc.detalle,
        }
    }
}
