// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Taxonomía de errores de la API. Solo `NotFound` tiene status propio;
// todo lo demás sale como 500 con el mensaje de la causa.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0} no encontrado")]
    NotFound(&'static str),

    #[error("Identificador inválido: '{0}'")]
    InvalidId(String),

    // Cuerpo ilegible o que no es un objeto JSON
    #[error("Cuerpo de la petición inválido: {0}")]
    InvalidBody(String),

    // Violación del índice único (ej.: `numventa` repetido)
    #[error("Clave duplicada en `{collection}`: {field} = {value}")]
    DuplicateKey {
        collection: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Error de base de datos: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    /// Detalle campo -> mensajes, solo para errores de validación.
    pub fn field_details(&self) -> Option<HashMap<String, Vec<String>>> {
        let AppError::ValidationError(errors) = self else {
            return None;
        };

        let mut details = HashMap::new();
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            details.insert(field.to_string(), messages);
        }
        Some(details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, body) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": message })),

            AppError::ValidationError(_) => {
                tracing::warn!("Documento rechazado: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": message, "details": self.field_details() }),
                )
            }

            // Validación, conectividad y unicidad no se distinguen por status.
            _ => {
                tracing::error!("Error Interno del Servidor: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}
