// src/models/legacy.rs
//
// Filas de la base relacional de origen (solo las lee la migración).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CargoRow {
    pub idcargo: i32,
    pub nombre: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoriaRow {
    pub idcategoria: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MarcaRow {
    pub idmarca: i32,
    pub nombre: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct EmpleadoRow {
    pub idempleado: i32,
    pub dni: String,
    pub nombre: String,
    pub telefono: String,
    pub sexo: String,
    pub direccion: String,
    pub fecha_ingreso: NaiveDate,
    pub salario: Decimal,
    pub idcargo: i32,
    pub clave: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ClienteRow {
    pub idcliente: i32,
    pub dni: String,
    pub nombre: String,
    pub telefono: String,
    pub sexo: String,
    pub fecha_naci: NaiveDate,
    pub direccion: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProductoRow {
    pub idproducto: i32,
    pub nombre: String,
    pub costo: Decimal,
    pub preciounit: Decimal,
    pub stock: i32,
    pub fecha_venci: NaiveDate,
    pub idmarca: i32,
    pub idcategoria: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct VentaRow {
    pub numventa: String,
    pub fecha: NaiveDate,
    pub idempleado: i32,
    pub idcliente: i32,
}

// `idventa` es el `numventa` de la venta.
#[derive(Debug, Clone, FromRow)]
pub struct DetalleVentaRow {
    pub idventa: String,
    pub idproducto: i32,
    pub cantidad: i32,
    pub precio: Decimal,
}
