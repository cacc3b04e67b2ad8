// src/db/legacy_repo.rs
//
// Lectura de la base relacional de origen. Solo lo usa la migración.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    migration::LegacySource,
    models::legacy::{
        CargoRow, CategoriaRow, ClienteRow, DetalleVentaRow, EmpleadoRow, MarcaRow, ProductoRow,
        VentaRow,
    },
};

#[derive(Clone)]
pub struct LegacyRepository {
    pool: PgPool,
}

impl LegacyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Una sola conexión: la migración lee una tabla por vez.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("✅ Conectado a la base relacional de origen");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl LegacySource for LegacyRepository {
    async fn cargos(&self) -> Result<Vec<CargoRow>, sqlx::Error> {
        sqlx::query_as::<_, CargoRow>("SELECT idcargo, nombre FROM cargo ORDER BY idcargo")
            .fetch_all(&self.pool)
            .await
    }

    async fn categorias(&self) -> Result<Vec<CategoriaRow>, sqlx::Error> {
        sqlx::query_as::<_, CategoriaRow>(
            "SELECT idcategoria, nombre, descripcion FROM categoria ORDER BY idcategoria",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn marcas(&self) -> Result<Vec<MarcaRow>, sqlx::Error> {
        sqlx::query_as::<_, MarcaRow>("SELECT idmarca, nombre FROM marca ORDER BY idmarca")
            .fetch_all(&self.pool)
            .await
    }

    async fn empleados(&self) -> Result<Vec<EmpleadoRow>, sqlx::Error> {
        sqlx::query_as::<_, EmpleadoRow>(
            r#"
            SELECT idempleado, dni, nombre, telefono, sexo, direccion,
                   fecha_ingreso, salario, idcargo, clave
            FROM empleado
            ORDER BY idempleado
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn clientes(&self) -> Result<Vec<ClienteRow>, sqlx::Error> {
        sqlx::query_as::<_, ClienteRow>(
            r#"
            SELECT idcliente, dni, nombre, telefono, sexo, fecha_naci, direccion
            FROM cliente
            ORDER BY idcliente
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn productos(&self) -> Result<Vec<ProductoRow>, sqlx::Error> {
        sqlx::query_as::<_, ProductoRow>(
            r#"
            SELECT idproducto, nombre, costo, preciounit, stock,
                   fecha_venci, idmarca, idcategoria
            FROM producto
            ORDER BY idproducto
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn ventas(&self) -> Result<Vec<VentaRow>, sqlx::Error> {
        sqlx::query_as::<_, VentaRow>(
            "SELECT numventa, fecha, idempleado, idcliente FROM venta ORDER BY numventa",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn detalles_venta(&self) -> Result<Vec<DetalleVentaRow>, sqlx::Error> {
        sqlx::query_as::<_, DetalleVentaRow>(
            r#"
            SELECT idventa, idproducto, cantidad, precio
            FROM detalle_venta
            ORDER BY idventa, idproducto
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            tracing::info!("👋 Conexión con la base relacional cerrada");
        }
    }
}
