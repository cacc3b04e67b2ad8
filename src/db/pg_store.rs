// src/db/pg_store.rs
//
// Document store sobre Postgres: una tabla `documents` con el cuerpo en
// JSONB. El `_id` vive en la columna `id` y se agrega al leer.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Merge},
    models::{health::ConnectionState, schema::ID_FIELD, Collection, Document},
};

const PING_TIMEOUT: Duration = Duration::from_secs(2);
const SCHEMA_RETRY: Duration = Duration::from_secs(5);

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Document>,
}

impl DocumentRow {
    fn into_document(self) -> Document {
        let mut document = self.body.0;
        document.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        document
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Arma el pool sin conectar todavía: solo falla si la URL es inválida.
    /// Las conexiones se abren al primer uso, así que el servidor arranca
    /// aunque la base no responda y `/health` informa el estado.
    pub fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(database_url)?;

        Ok(Self::new(pool))
    }

    /// Crea la tabla `documents` y sus índices si todavía no existen.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await?;
        tracing::info!("✅ Conexión con el document store establecida, esquema al día");
        Ok(())
    }

    /// Reintenta `run_migrations` hasta que la base responda o se cierre el pool.
    pub async fn run_migrations_until_ready(&self) {
        loop {
            match self.run_migrations().await {
                Ok(()) => return,
                Err(e) => {
                    tracing::error!("🔥 Document store no disponible: {}", e);
                    tracing::warn!("Reintentando en {} s...", SCHEMA_RETRY.as_secs());
                }
            }

            tokio::time::sleep(SCHEMA_RETRY).await;
            if self.pool.is_closed() {
                return;
            }
        }
    }

    fn map_write_error(collection: Collection, document: &Document, e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                let field = collection.schema().unique.first().copied().unwrap_or(ID_FIELD);
                let value = document
                    .get(field)
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .unwrap_or_default();
                return AppError::DuplicateKey { collection: collection.name(), field, value };
            }
        }
        e.into()
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, AppError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY seq ASC",
        )
        .bind(collection.name())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DocumentRow::into_document).collect())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DocumentRow::into_document))
    }

    async fn find_many(
        &self,
        collection: Collection,
        ids: &[Uuid],
    ) -> Result<Vec<Document>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = ANY($2) ORDER BY seq ASC",
        )
        .bind(collection.name())
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DocumentRow::into_document).collect())
    }

    async fn insert(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<Document, AppError> {
        document.remove(ID_FIELD);
        let id = Uuid::new_v4();

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            RETURNING id, body
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(&document))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(collection, &document, e))?;

        Ok(row.into_document())
    }

    async fn update_with(
        &self,
        collection: Collection,
        id: Uuid,
        merge: Merge,
    ) -> Result<Option<Document>, AppError> {
        let mut tx = self.pool.begin().await?;

        // `FOR UPDATE` bloquea la fila hasta el commit: otra actualización
        // del mismo documento espera y luego lee el cuerpo ya modificado.
        let current = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
        )
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };
        let mut document = merge(current.body.0)?;
        document.remove(ID_FIELD);

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET body = $3, updated_at = now()
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(&document))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Self::map_write_error(collection, &document, e))?;

        tx.commit().await?;
        Ok(Some(row.into_document()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn connection_state(&self) -> ConnectionState {
        if self.pool.is_closed() {
            return ConnectionState::Disconnected;
        }

        let ping = sqlx::query("SELECT 1").execute(&self.pool);
        match tokio::time::timeout(PING_TIMEOUT, ping).await {
            Ok(Ok(_)) => ConnectionState::Connected,
            Ok(Err(e)) => {
                tracing::warn!("Ping al document store falló: {}", e);
                ConnectionState::Disconnected
            }
            // Sin respuesta todavía: el pool sigue intentando abrir conexión.
            Err(_) => ConnectionState::Connecting,
        }
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            tracing::info!("👋 Conexión con el document store cerrada");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nada escucha en el puerto 1: el pool se arma igual y el estado lo refleja.
    #[tokio::test]
    async fn unreachable_database_is_reported_not_fatal() {
        let store = PgDocumentStore::connect("postgres://postgres@127.0.0.1:1/ferreteria", 1).unwrap();

        let state = store.connection_state().await;
        assert!(
            matches!(state, ConnectionState::Disconnected | ConnectionState::Connecting),
            "estado inesperado: {state:?}"
        );

        store.close().await;
        assert_eq!(store.connection_state().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn malformed_urls_are_rejected_up_front() {
        assert!(PgDocumentStore::connect("no-es-una-url", 1).is_err());
    }
}
