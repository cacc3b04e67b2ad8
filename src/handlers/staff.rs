// src/handlers/staff.rs

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
        entities::{Cargo, Empleado, MessageResponse},
        Collection,
    },
};

// =============================================================================
//  CARGOS
// =============================================================================

// GET /cargos
#[utoipa::path(
    get,
    path = "/cargos",
    tag = "Cargos",
    responses(
        (status = 200, description = "Lista de cargos", body = Vec<Cargo>),
        (status = 500, description = "Error del document store")
    )
)]
pub async fn list_cargos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cargos = app_state.catalog_service.list(Collection::Cargos).await?;
    Ok((StatusCode::OK, Json(cargos)))
}

// POST /cargos
#[utoipa::path(
    post,
    path = "/cargos",
    tag = "Cargos",
    request_body = Cargo,
    responses(
        (status = 201, description = "Cargo creado (incluye `_id`)", body = Cargo),
        (status = 500, description = "Datos inválidos o error del store")
    )
)]
pub async fn create_cargo(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let cargo = app_state.catalog_service.create(Collection::Cargos, payload).await?;
    Ok((StatusCode::CREATED, Json(cargo)))
}

// =============================================================================
//  EMPLEADOS
// =============================================================================

// GET /empleados
#[utoipa::path(
    get,
    path = "/empleados",
    tag = "Empleados",
    responses(
        (status = 200, description = "Empleados con `idcargo` expandido a { _id, nombre }", body = Vec<Empleado>),
        (status = 500, description = "Error del document store")
    )
)]
pub async fn list_empleados(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let empleados = app_state.catalog_service.list(Collection::Empleados).await?;
    Ok((StatusCode::OK, Json(empleados)))
}

// GET /empleados/{id}
#[utoipa::path(
    get,
    path = "/empleados/{id}",
    tag = "Empleados",
    params(("id" = String, Path, description = "Identificador del empleado")),
    responses(
        (status = 200, description = "Empleado con `idcargo` expandido", body = Empleado),
        (status = 404, description = "Empleado no encontrado")
    )
)]
pub async fn get_empleado(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let empleado = app_state.catalog_service.get(Collection::Empleados, &id).await?;
    Ok((StatusCode::OK, Json(empleado)))
}

// POST /empleados
#[utoipa::path(
    post,
    path = "/empleados",
    tag = "Empleados",
    request_body = Empleado,
    responses(
        (status = 201, description = "Empleado creado (incluye `_id`)", body = Empleado),
        (status = 500, description = "Datos inválidos o cargo inexistente")
    )
)]
pub async fn create_empleado(
    State(app_state): State<AppState>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let empleado = app_state.catalog_service.create(Collection::Empleados, payload).await?;
    Ok((StatusCode::CREATED, Json(empleado)))
}

// PUT /empleados/{id}
#[utoipa::path(
    put,
    path = "/empleados/{id}",
    tag = "Empleados",
    params(("id" = String, Path, description = "Identificador del empleado")),
    request_body = Empleado,
    responses(
        (status = 200, description = "Empleado actualizado", body = Empleado),
        (status = 404, description = "Empleado no encontrado"),
        (status = 500, description = "Datos inválidos")
    )
)]
pub async fn update_empleado(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    DocumentBody(payload): DocumentBody,
) -> Result<impl IntoResponse, AppError> {
    let empleado = app_state
        .catalog_service
        .update(Collection::Empleados, &id, payload)
        .await?;
    Ok((StatusCode::OK, Json(empleado)))
}

// DELETE /empleados/{id}
#[utoipa::path(
    delete,
    path = "/empleados/{id}",
    tag = "Empleados",
    params(("id" = String, Path, description = "Identificador del empleado")),
    responses(
        (status = 200, description = "Empleado eliminado", body = MessageResponse),
        (status = 404, description = "Empleado no encontrado")
    )
)]
pub async fn delete_empleado(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete(Collection::Empleados, &id).await?;
    Ok((StatusCode::OK, Json(MessageResponse {
        message: "Empleado eliminado correctamente".to_string(),
    })))
}
