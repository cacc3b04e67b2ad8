// src/handlers/clients.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::AppError, extract::DocumentBody},
    config::AppState,
    models::{
        entities::{Cliente, MessageResponse},
        Collection,
    },
};

// GET /clientes
#[utoipa::path(
    get,
    path = "/clientes",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Cliente>),
        (status = 500, description = "Error del document store")
    )
)]
pub async fn list_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.catalog_service.list(Collection::Clientes).await?;
    Ok((StatusCode::OK, Json(clientes)))
}

// GET /clientes/{id}
#[utoipa::path(
    get,
    path = "/clientes/{id}",
    tag = "Clientes",
    params(("id" = String, Path, description = "Identificador del cliente")),
    responses(
        (status = 200, description = "Cliente", body = Cliente),
        (status = 404, description = "Cliente no encontrado")
    )
)]
pub async fn get_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.catalog_service.get(Collection::Clientes, &id).await?;
    Ok((StatusCode::OK, Json(cliente)))
}

// POST /clientes
#[utoipa::path(
    post,
    path = "/clientes",
    tag = "Clientes",
    request_body = Cliente,
    responses(
        (status = 201, description = "Cliente creado (incluye `_id`)", body = Cliente),
        (status = 500, description = "Datos inválidos o error del store")
    )
)]
pub async fn create_cliente(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.catalog_service.create(Collection::Clientes, payload).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// PUT /clientes/{id}
#[utoipa::path(
    put,
    path = "/clientes/{id}",
    tag = "Clientes",
    params(("id" = String, Path, description = "Identificador del cliente")),
    request_body = Cliente,
    responses(
        (status = 200, description = "Cliente actualizado", body = Cliente),
        (status = 404, description = "Cliente no encontrado"),
        (status = 500, description = "Datos inválidos")
    )
)]
pub async fn update_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state
        .catalog_service
        .update(Collection::Clientes, &id, payload)
        .await?;
    Ok((StatusCode::OK, Json(cliente)))
}

// DELETE /clientes/{id}
#[utoipa::path(
    delete,
    path = "/clientes/{id}",
    tag = "Clientes",
    params(("id" = String, Path, description = "Identificador del cliente")),
    responses(
        (status = 200, description = "Cliente eliminado", body = MessageResponse),
        (status = 404, description = "Cliente no encontrado")
    )
)]
pub async fn delete_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete(Collection::Clientes, &id).await?;
    Ok((StatusCode::OK, Json(MessageResponse {
        message: "Cliente eliminado correctamente".to_string(),
    })))
}
