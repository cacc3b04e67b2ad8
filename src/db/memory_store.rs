// src/db/memory_store.rs
//
// Document store en memoria. Respeta los mismos contratos que el de
// Postgres (orden de inserción, índices únicos, `_id` generado), así que
// sirve para los tests y para levantar la API sin base de datos.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Merge},
    models::{
        health::ConnectionState,
        schema::{document_id, ID_FIELD},
        Collection, Document,
    },
};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cantidad de documentos de una colección.
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn check_unique(
        collection: Collection,
        existing: &[Document],
        candidate: &Document,
        skip: Option<Uuid>,
    ) -> Result<(), AppError> {
        for &field in collection.schema().unique {
            let Some(value) = candidate.get(field) else { continue };

            let taken = existing
                .iter()
                .filter(|doc| skip.is_none() || document_id(doc) != skip)
                .any(|doc| doc.get(field) == Some(value));

            if taken {
                return Err(AppError::DuplicateKey {
                    collection: collection.name(),
                    field,
                    value: value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string()),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, AppError> {
        self.ensure_open()?;
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, AppError> {
        self.ensure_open()?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| document_id(doc) == Some(id)))
            .cloned())
    }

    async fn find_many(
        &self,
        collection: Collection,
        ids: &[Uuid],
    ) -> Result<Vec<Document>, AppError> {
        self.ensure_open()?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| document_id(doc).is_some_and(|id| ids.contains(&id)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<Document, AppError> {
        self.ensure_open()?;
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();

        Self::check_unique(collection, docs, &document, None)?;

        document.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
        docs.push(document.clone());
        Ok(document)
    }

    async fn update_with(
        &self,
        collection: Collection,
        id: Uuid,
        merge: Merge,
    ) -> Result<Option<Document>, AppError> {
        self.ensure_open()?;
        // El guard de escritura cubre lectura, merge y reemplazo.
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(None);
        };
        let Some(index) = docs.iter().position(|doc| document_id(doc) == Some(id)) else {
            return Ok(None);
        };

        let mut current = docs[index].clone();
        current.remove(ID_FIELD);
        let mut document = merge(current)?;

        Self::check_unique(collection, docs, &document, Some(id))?;

        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        docs[index] = document.clone();
        Ok(Some(document))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        self.ensure_open()?;
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|doc| document_id(doc) != Some(id));
        Ok(docs.len() < before)
    }

    async fn connection_state(&self) -> ConnectionState {
        if self.closed.load(Ordering::SeqCst) {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Connected
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn venta(numventa: &str) -> Document {
        match json!({ "numventa": numventa }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_keeps_order() {
        let store = MemoryStore::new();
        let first = store.insert(Collection::Marcas, venta("A")).await.unwrap();
        let second = store.insert(Collection::Marcas, venta("B")).await.unwrap();

        assert_ne!(document_id(&first), document_id(&second));
        let all = store.find_all(Collection::Marcas).await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn unique_fields_are_enforced_per_collection() {
        let store = MemoryStore::new();
        store.insert(Collection::Ventas, venta("V001")).await.unwrap();

        let err = store.insert(Collection::Ventas, venta("V001")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey { field: "numventa", .. }));

        // Otras colecciones no tienen índice sobre ese campo.
        store.insert(Collection::Marcas, venta("V001")).await.unwrap();
        store.insert(Collection::Marcas, venta("V001")).await.unwrap();
    }

    fn set_numventa(numventa: &'static str) -> Merge {
        Box::new(move |mut stored: Document| {
            stored.insert("numventa".into(), json!(numventa));
            Ok(stored)
        })
    }

    #[tokio::test]
    async fn update_may_keep_its_own_unique_value() {
        let store = MemoryStore::new();
        let stored = store.insert(Collection::Ventas, venta("V001")).await.unwrap();
        let other = store.insert(Collection::Ventas, venta("V002")).await.unwrap();
        let id = document_id(&stored).unwrap();

        let updated = store
            .update_with(Collection::Ventas, id, set_numventa("V001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, stored);

        let err = store
            .update_with(Collection::Ventas, document_id(&other).unwrap(), set_numventa("V001"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn merge_sees_the_stored_body_and_can_abort() {
        let store = MemoryStore::new();
        let stored = store.insert(Collection::Ventas, venta("V001")).await.unwrap();
        let id = document_id(&stored).unwrap();

        let err = store
            .update_with(
                Collection::Ventas,
                id,
                Box::new(|current: Document| {
                    assert!(!current.contains_key(ID_FIELD));
                    assert_eq!(current["numventa"], json!("V001"));
                    Err(AppError::NotFound("Venta"))
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let unchanged = store.find_by_id(Collection::Ventas, id).await.unwrap();
        assert_eq!(unchanged, Some(stored));
    }

    #[tokio::test]
    async fn missing_ids_are_reported_without_errors() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(store.find_by_id(Collection::Clientes, id).await.unwrap().is_none());
        assert!(store
            .update_with(Collection::Clientes, id, Box::new(|stored: Document| Ok(stored)))
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(Collection::Clientes, id).await.unwrap());
        assert!(store.find_many(Collection::Clientes, &[id]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn close_disconnects_and_rejects_operations() {
        let store = MemoryStore::new();
        assert_eq!(store.connection_state().await, ConnectionState::Connected);

        store.close().await;

        assert_eq!(store.connection_state().await, ConnectionState::Disconnected);
        assert!(matches!(
            store.find_all(Collection::Cargos).await,
            Err(AppError::DatabaseError(sqlx::Error::PoolClosed))
        ));
    }
}
