use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::solicitud::{Detalle, Estado, Solicitud, SolicitudDoc, Tipo};
use crate::store::{DocumentCollection, MemoryCollection, StoreError};

/// Fields callers can never change through a partial update. `id` lives in
/// the storage key, `tipo` and `fechaCreacion` are set once at creation.
const IMMUTABLE_FIELDS: [&str; 3] = ["id", "tipo", "fechaCreacion"];

#[derive(Clone)]
pub struct SolicitudGateway {
    collection: Arc<dyn DocumentCollection>,
}

impl SolicitudGateway {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCollection::new()))
    }

    /// Writes a new request as a single document. The status defaults to
    /// Pendiente when absent and the creation time is assigned server-side.
    pub async fn create(
        &self,
        detalle: Detalle,
        estado: Option<Estado>,
    ) -> Result<Solicitud, StoreError> {
        let doc = SolicitudDoc {
            estado: estado.unwrap_or(Estado::Pendiente),
            fecha_creacion: Utc::now(),
            detalle,
        };

        let value = serde_json::to_value(&doc)
            .map_err(|err| StoreError::Backend(format!("failed to serialize document: {err}")))?;
        let id = self.collection.insert(value).await?;

        debug!(id = %id, tipo = doc.detalle.tipo().as_str(), "solicitud created");
        Ok(Solicitud::from_doc(id, doc))
    }

    /// Not-found is an expected outcome, not an error.
    pub async fn get(&self, id: &str) -> Result<Option<Solicitud>, StoreError> {
        match self.collection.get(id).await? {
            Some(value) => Ok(Some(decode(id.to_string(), value)?)),
            None => Ok(None),
        }
    }

    /// All requests of one kind, newest first.
    pub async fn list_by_tipo(&self, tipo: Tipo) -> Result<Vec<Solicitud>, StoreError> {
        let mut matching = Vec::new();

        for (id, value) in self.collection.scan().await? {
            if value.get("tipo").and_then(Value::as_str) != Some(tipo.as_str()) {
                continue;
            }
            matching.push(decode(id, value)?);
        }

        matching.sort_by(|a, b| b.fecha_creacion.cmp(&a.fecha_creacion));
        Ok(matching)
    }

    /// Merges a subset of fields into an existing document. Immutable fields
    /// are stripped from the patch even when present, so a caller cannot
    /// change a request's kind or backdate its creation. Last write wins;
    /// there is no version token.
    pub async fn update(
        &self,
        id: &str,
        mut patch: Map<String, Value>,
    ) -> Result<Solicitud, StoreError> {
        for field in IMMUTABLE_FIELDS {
            patch.remove(field);
        }

        if let Some(raw) = patch.get("estado") {
            serde_json::from_value::<Estado>(raw.clone())
                .map_err(|_| StoreError::InvalidPatch(format!("estado inválido: {raw}")))?;
        }

        let current = self
            .collection
            .get(id)
            .await?
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;

        let mut merged = match current {
            Value::Object(fields) => fields,
            other => {
                return Err(StoreError::Backend(format!(
                    "document {id} is not an object: {other}"
                )));
            }
        };
        for (key, value) in patch {
            merged.insert(key, value);
        }

        let merged = Value::Object(merged);
        let doc: SolicitudDoc = serde_json::from_value(merged.clone())
            .map_err(|err| StoreError::InvalidPatch(format!("la solicitud quedaría inválida: {err}")))?;

        self.collection.replace(id, merged).await?;
        debug!(id = %id, "solicitud updated");
        Ok(Solicitud::from_doc(id.to_string(), doc))
    }

    /// Idempotent: deleting an unknown id is a no-op.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.collection.delete(id).await?;
        debug!(id = %id, "solicitud deleted");
        Ok(())
    }
}

fn decode(id: String, value: Value) -> Result<Solicitud, StoreError> {
    let doc: SolicitudDoc = serde_json::from_value(value)
        .map_err(|err| StoreError::Backend(format!("corrupt document {id}: {err}")))?;
    Ok(Solicitud::from_doc(id, doc))
}
