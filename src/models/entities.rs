// src/models/entities.rs
//
// Formas tipadas de cada documento. La API trabaja con `Document` (JSON
// libre validado contra el esquema); estas structs describen el contrato
// para OpenAPI y las usa la migración para armar los documentos.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::schema::Document;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Cargo {
    #[schema(example = "Vendedor")]
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Empleado {
    #[schema(example = "45879632")]
    pub dni: String,
    #[schema(example = "Luis Ramírez")]
    pub nombre: String,
    #[schema(example = "987654321")]
    pub telefono: String,
    #[schema(example = "M")]
    pub sexo: String,
    #[schema(example = "Jr. Amazonas 450")]
    pub direccion: String,
    pub fecha_ingreso: NaiveDate,
    #[schema(example = 1500.0)]
    pub salario: Decimal,
    pub idcargo: Uuid,
    #[schema(example = "lr2024")]
    pub clave: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Cliente {
    #[schema(example = "70214589")]
    pub dni: String,
    #[schema(example = "María Torres")]
    pub nombre: String,
    #[schema(example = "956321478")]
    pub telefono: String,
    #[schema(example = "F")]
    pub sexo: String,
    pub fecha_naci: NaiveDate,
    #[schema(example = "Calle Lima 210")]
    pub direccion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Categoria {
    #[schema(example = "Herramientas manuales")]
    pub nombre: String,
    #[schema(example = "Martillos, alicates, destornilladores")]
    pub descripcion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Marca {
    #[schema(example = "Stanley")]
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Producto {
    #[schema(example = "Martillo de uña 16oz")]
    pub nombre: String,
    #[schema(example = 18.5)]
    pub costo: Decimal,
    #[schema(example = 25.9)]
    pub preciounit: Decimal,
    #[schema(example = 40)]
    pub stock: i32,
    pub fecha_venci: NaiveDate,
    pub idmarca: Uuid,
    pub idcategoria: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Venta {
    /// Código de negocio único (máx. 4 caracteres).
    #[schema(example = "V001")]
    pub numventa: String,
    pub fecha: NaiveDate,
    pub idempleado: Uuid,
    pub idcliente: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetalleVenta {
    /// `numventa` de la venta, no su `_id`.
    #[schema(example = "V001")]
    pub idventa: String,
    pub idproducto: Uuid,
    #[schema(example = 2)]
    pub cantidad: i32,
    #[schema(example = 25.9)]
    pub precio: Decimal,
}

/// Respuesta de los DELETE.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Empleado eliminado correctamente")]
    pub message: String,
}

/// Serializa una entidad tipada como documento JSON.
pub fn to_document<T: Serialize>(entity: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(entity)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(serde::ser::Error::custom("la entidad no se serializa como objeto JSON")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{collection::Collection, schema::validate};
    use serde_json::json;

    #[test]
    fn typed_product_passes_the_schema() {
        let producto = Producto {
            nombre: "Taladro percutor".into(),
            costo: Decimal::new(21040, 2),
            preciounit: Decimal::new(28990, 2),
            stock: 7,
            fecha_venci: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            idmarca: Uuid::new_v4(),
            idcategoria: Uuid::new_v4(),
        };

        let document = to_document(&producto).unwrap();
        let validated = validate(Collection::Productos.schema(), &document).unwrap();

        assert_eq!(validated["costo"], json!(210.4));
        assert_eq!(validated["fecha_venci"], json!("2030-12-31T00:00:00.000Z"));
        assert_eq!(validated["idmarca"], json!(producto.idmarca.to_string()));
    }

    #[test]
    fn missing_category_description_fails_validation() {
        let categoria = Categoria { nombre: "Pinturas".into(), descripcion: String::new() };
        let document = to_document(&categoria).unwrap();

        let errors = validate(Collection::Categorias.schema(), &document).unwrap_err();
        assert!(errors.field_errors().contains_key("descripcion"));
    }
}
