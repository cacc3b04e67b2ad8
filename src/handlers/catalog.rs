// src/handlers/catalog.rs

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
        entities::{Categoria, Marca, MessageResponse, Producto},
        Collection,
    },
};

// =============================================================================
//  CATEGORÍAS Y MARCAS (solo listar y crear)
// =============================================================================

// GET /categorias
#[utoipa::path(
    get,
    path = "/categorias",
    tag = "Categorías",
    responses((status = 200, description = "Lista de categorías", body = Vec<Categoria>))
)]
pub async fn list_categorias(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categorias = app_state.catalog_service.list(Collection::Categorias).await?;
    Ok((StatusCode::OK, Json(categorias)))
}

// POST /categorias
#[utoipa::path(
    post,
    path = "/categorias",
    tag = "Categorías",
    request_body = Categoria,
    responses(
        (status = 201, description = "Categoría creada (incluye `_id`)", body = Categoria),
        (status = 500, description = "Datos inválidos o error del store")
    )
)]
pub async fn create_categoria(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let categoria = app_state.catalog_service.create(Collection::Categorias, payload).await?;
    Ok((StatusCode::CREATED, Json(categoria)))
}

// GET /marcas
#[utoipa::path(
    get,
    path = "/marcas",
    tag = "Marcas",
    responses((status = 200, description = "Lista de marcas", body = Vec<Marca>))
)]
pub async fn list_marcas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let marcas = app_state.catalog_service.list(Collection::Marcas).await?;
    Ok((StatusCode::OK, Json(marcas)))
}

// POST /marcas
#[utoipa::path(
    post,
    path = "/marcas",
    tag = "Marcas",
    request_body = Marca,
    responses(
        (status = 201, description = "Marca creada (incluye `_id`)", body = Marca),
        (status = 500, description = "Datos inválidos o error del store")
    )
)]
pub async fn create_marca(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let marca = app_state.catalog_service.create(Collection::Marcas, payload).await?;
    Ok((StatusCode::CREATED, Json(marca)))
}

// =============================================================================
//  PRODUCTOS
// =============================================================================

// GET /productos
#[utoipa::path(
    get,
    path = "/productos",
    tag = "Productos",
    responses(
        (status = 200, description = "Productos con marca y categoría expandidas", body = Vec<Producto>),
        (status = 500, description = "Error del document store")
    )
)]
pub async fn list_productos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state.catalog_service.list(Collection::Productos).await?;
    Ok((StatusCode::OK, Json(productos)))
}

// GET /productos/{id}
#[utoipa::path(
    get,
    path = "/productos/{id}",
    tag = "Productos",
    params(("id" = String, Path, description = "Identificador del producto")),
    responses(
        (status = 200, description = "Producto con marca y categoría expandidas", body = Producto),
        (status = 404, description = "Producto no encontrado")
    )
)]
pub async fn get_producto(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state.catalog_service.get(Collection::Productos, &id).await?;
    Ok((StatusCode::OK, Json(producto)))
}

// POST /productos
#[utoipa::path(
    post,
    path = "/productos",
    tag = "Productos",
    request_body = Producto,
    responses(
        (status = 201, description = "Producto creado (incluye `_id`)", body = Producto),
        (status = 500, description = "Datos inválidos, marca o categoría inexistente")
    )
)]
pub async fn create_producto(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state.catalog_service.create(Collection::Productos, payload).await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

// PUT /productos/{id}
#[utoipa::path(
    put,
    path = "/productos/{id}",
    tag = "Productos",
    params(("id" = String, Path, description = "Identificador del producto")),
    request_body = Producto,
    responses(
        (status = 200, description = "Producto actualizado", body = Producto),
        (status = 404, description = "Producto no encontrado"),
        (status = 500, description = "Datos inválidos")
    )
)]
pub async fn update_producto(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state
        .catalog_service
        .update(Collection::Productos, &id, payload)
        .await?;
    Ok((StatusCode::OK, Json(producto)))
}

// DELETE /productos/{id}
#[utoipa::path(
    delete,
    path = "/productos/{id}",
    tag = "Productos",
    params(("id" = String, Path, description = "Identificador del producto")),
    responses(
        (status = 200, description = "Producto eliminado", body = MessageResponse),
        (status = 404, description = "Producto no encontrado")
    )
)]
pub async fn delete_producto(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete(Collection::Productos, &id).await?;
    Ok((StatusCode::OK, Json(MessageResponse {
        message: "Producto eliminado correctamente".to_string(),
    })))
}
