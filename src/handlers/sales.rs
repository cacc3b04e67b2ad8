// src/handlers/sales.rs
//
// Ventas y detalles solo se listan y se crean. Un detalle se enlaza a su
// venta por `numventa` (campo `idventa`), no por `_id`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::{error::AppError, extract::DocumentBody},
    config::AppState,
    models::{
        entities::{DetalleVenta, Venta},
        Collection,
    },
};

// GET /ventas
#[utoipa::path(
    get,
    path = "/ventas",
    tag = "Ventas",
    responses(
        (status = 200, description = "Ventas con empleado y cliente expandidos a { _id, nombre }", body = Vec<Venta>),
        (status = 500, description = "Error del document store")
    )
)]
pub async fn list_ventas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let ventas = app_state.catalog_service.list(Collection::Ventas).await?;
    Ok((StatusCode::OK, Json(ventas)))
}

// POST /ventas
#[utoipa::path(
    post,
    path = "/ventas",
    tag = "Ventas",
    request_body = Venta,
    responses(
        (status = 201, description = "Venta creada (incluye `_id`)", body = Venta),
        (status = 500, description = "Datos inválidos o `numventa` duplicado")
    )
)]
pub async fn create_venta(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let venta = app_state.catalog_service.create(Collection::Ventas, payload).await?;
    Ok((StatusCode::CREATED, Json(venta)))
}

// GET /detalle-ventas
#[utoipa::path(
    get,
    path = "/detalle-ventas",
    tag = "Ventas",
    responses(
        (status = 200, description = "Detalles con producto expandido a { _id, nombre, costo }", body = Vec<DetalleVenta>),
        (status = 500, description = "Error del document store")
    )
)]
pub async fn list_detalle_ventas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let detalles = app_state.catalog_service.list(Collection::DetalleVentas).await?;
    Ok((StatusCode::OK, Json(detalles)))
}

// POST /detalle-ventas
#[utoipa::path(
    post,
    path = "/detalle-ventas",
    tag = "Ventas",
    request_body = DetalleVenta,
    responses(
        (status = 201, description = "Detalle creado (incluye `_id`)", body = DetalleVenta),
        (status = 500, description = "Datos inválidos o producto inexistente")
    )
)]
pub async fn create_detalle_venta(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let detalle = app_state
        .catalog_service
        .create(Collection::DetalleVentas, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(detalle)))
}
