// src/services/catalog_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::ValidationErrors;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Merge},
    models::{
        schema::{self, dangling_reference_error, parse_id, Schema, ID_FIELD},
        Collection, Document,
    },
    services::expansion::{expand, expansions_for},
};

/// Operaciones CRUD de una sola colección. Valida contra el esquema,
/// verifica que las referencias existan y expande al leer.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    // ---
    // Lectura
    // ---

    pub async fn list(&self, collection: Collection) -> Result<Vec<Document>, AppError> {
        let mut documents = self.store.find_all(collection).await?;
        expand(self.store(), &mut documents, expansions_for(collection)).await?;
        Ok(documents)
    }

    pub async fn get(&self, collection: Collection, raw_id: &str) -> Result<Document, AppError> {
        let id = Self::parse_path_id(raw_id)?;

        let document = self
            .store
            .find_by_id(collection, id)
            .await?
            .ok_or(AppError::NotFound(collection.label()))?;

        let mut documents = [document];
        expand(self.store(), &mut documents, expansions_for(collection)).await?;
        let [document] = documents;
        Ok(document)
    }

    // ---
    // Escritura
    // ---

    pub async fn create(&self, collection: Collection, body: Document) -> Result<Document, AppError> {
        let schema = collection.schema();
        let document = schema::validate(schema, &body)?;
        self.check_references(schema, &document).await?;

        let stored = self.store.insert(collection, document).await?;
        tracing::debug!("{} creado: {:?}", collection.label(), stored.get(ID_FIELD));
        Ok(stored)
    }

    /// Aplica los campos presentes en `body` sobre el documento guardado y
    /// vuelve a validar el resultado completo. Lectura, merge y escritura
    /// ocurren dentro de una única operación del store.
    pub async fn update(
        &self,
        collection: Collection,
        raw_id: &str,
        body: Document,
    ) -> Result<Document, AppError> {
        let id = Self::parse_path_id(raw_id)?;
        let schema = collection.schema();

        // Solo las referencias que llegan en el cuerpo pueden cambiar.
        self.check_references(schema, &body).await?;

        let merge: Merge = Box::new(move |mut stored: Document| {
            stored.extend(body.into_iter().filter(|(key, _)| key != ID_FIELD));
            Ok(schema::validate(schema, &stored)?)
        });

        self.store
            .update_with(collection, id, merge)
            .await?
            .ok_or(AppError::NotFound(collection.label()))
    }

    pub async fn delete(&self, collection: Collection, raw_id: &str) -> Result<(), AppError> {
        let id = Self::parse_path_id(raw_id)?;

        if !self.store.delete(collection, id).await? {
            return Err(AppError::NotFound(collection.label()));
        }
        tracing::debug!("{} eliminado: {}", collection.label(), id);
        Ok(())
    }

    // ---
    // Auxiliares
    // ---

    fn parse_path_id(raw_id: &str) -> Result<Uuid, AppError> {
        parse_id(raw_id).ok_or_else(|| AppError::InvalidId(raw_id.to_string()))
    }

    /// Cada referencia debe apuntar a un documento existente.
    async fn check_references(&self, schema: &Schema, document: &Document) -> Result<(), AppError> {
        let mut errors = ValidationErrors::new();

        for (field, target) in schema.references() {
            let Some(id) = document.get(field).and_then(|v| v.as_str()).and_then(parse_id) else {
                continue;
            };
            if self.store.find_by_id(target, id).await?.is_none() {
                errors.add(field, dangling_reference_error(field, target, id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(errors))
        }
    }
}
