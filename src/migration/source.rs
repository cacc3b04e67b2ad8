// src/migration/source.rs

use async_trait::async_trait;

use crate::models::legacy::{
    CargoRow, CategoriaRow, ClienteRow, DetalleVentaRow, EmpleadoRow, MarcaRow, ProductoRow,
    VentaRow,
};

/// Lectura de las ocho tablas de origen, cada una ordenada por su clave
/// primaria (`detalle_venta` por `idventa, idproducto`).
#[async_trait]
pub trait LegacySource: Send + Sync {
    async fn cargos(&self) -> Result<Vec<CargoRow>, sqlx::Error>;
    async fn categorias(&self) -> Result<Vec<CategoriaRow>, sqlx::Error>;
    async fn marcas(&self) -> Result<Vec<MarcaRow>, sqlx::Error>;
    async fn empleados(&self) -> Result<Vec<EmpleadoRow>, sqlx::Error>;
    async fn clientes(&self) -> Result<Vec<ClienteRow>, sqlx::Error>;
    async fn productos(&self) -> Result<Vec<ProductoRow>, sqlx::Error>;
    async fn ventas(&self) -> Result<Vec<VentaRow>, sqlx::Error>;
    async fn detalles_venta(&self) -> Result<Vec<DetalleVentaRow>, sqlx::Error>;

    /// Libera la conexión. Idempotente.
    async fn close(&self);
}
