// src/migration/error.rs

use thiserror::Error;

use crate::common::error::AppError;

/// Cualquier variante aborta la migración completa.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Falla al leer la tabla `{table}`")]
    Source {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Falla al insertar en `{collection}` el registro legado {legacy_key}")]
    Store {
        collection: &'static str,
        legacy_key: String,
        #[source]
        source: AppError,
    },

    #[error("El registro {legacy_key} de `{table}` referencia {field} = {missing}, que no fue migrado")]
    MissingReference {
        table: &'static str,
        legacy_key: String,
        field: &'static str,
        missing: i32,
    },

    #[error("El document store no devolvió `_id` para el registro {legacy_key} de `{table}`")]
    MissingId {
        table: &'static str,
        legacy_key: String,
    },

    #[error("Falla al serializar el documento")]
    Serialize(#[from] serde_json::Error),
}

impl MigrationError {
    /// Nombre corto del tipo de error, para el log final.
    pub fn kind(&self) -> &'static str {
        match self {
            MigrationError::Source { .. } => "lectura",
            MigrationError::Store { .. } => "escritura",
            MigrationError::MissingReference { .. } => "referencia",
            MigrationError::MissingId { .. } => "identificador",
            MigrationError::Serialize(_) => "serialización",
        }
    }
}
