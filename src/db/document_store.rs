// src/db/document_store.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{health::ConnectionState, Collection, Document},
};

/// Transformación del documento guardado dentro de una actualización.
pub type Merge = Box<dyn FnOnce(Document) -> Result<Document, AppError> + Send>;

/// Operaciones de una sola colección sobre el document store.
///
/// Los documentos devueltos siempre incluyen `_id`. Cada escritura es
/// atómica por documento; no hay transacciones entre documentos.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Todos los documentos, en orden de inserción.
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, AppError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, AppError>;

    /// Búsqueda en lote; los ids inexistentes simplemente no aparecen.
    async fn find_many(
        &self,
        collection: Collection,
        ids: &[Uuid],
    ) -> Result<Vec<Document>, AppError>;

    /// Persiste el documento con un `_id` nuevo generado por el store.
    async fn insert(&self, collection: Collection, document: Document)
        -> Result<Document, AppError>;

    /// Lee el documento, le aplica `merge` y guarda el resultado sin que
    /// otra escritura pueda intercalarse. `None` si el id no existe.
    ///
    /// `merge` recibe el cuerpo guardado (sin `_id`); si falla, no se escribe nada.
    async fn update_with(
        &self,
        collection: Collection,
        id: Uuid,
        merge: Merge,
    ) -> Result<Option<Document>, AppError>;

    /// `true` si había un documento con ese id.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError>;

    async fn connection_state(&self) -> ConnectionState;

    /// Libera las conexiones. Idempotente.
    async fn close(&self);
}
