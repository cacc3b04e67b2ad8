// src/common/extract.rs

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::{common::error::AppError, models::Document};

/// Cuerpo de un POST/PUT como documento JSON.
///
/// No exige `Content-Type`; un cuerpo vacío equivale a `{}` y lo rechaza
/// luego la validación. JSON ilegible o que no sea objeto sale como
/// `AppError::InvalidBody`, así que nunca aparece un 4xx del extractor.
pub struct DocumentBody(pub Document);

impl<S> FromRequest<S> for DocumentBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Document::new()));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(document)) => Ok(Self(document)),
            Ok(_) => Err(AppError::InvalidBody("se esperaba un objeto JSON".into())),
            Err(e) => Err(AppError::InvalidBody(e.to_string())),
        }
    }
}
