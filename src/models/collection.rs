// src/models/collection.rs

use serde::Serialize;

use super::schema::{FieldSpec, Schema};

/// Las ocho colecciones del document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Cargos,
    Empleados,
    Clientes,
    Categorias,
    Marcas,
    Productos,
    Ventas,
    DetalleVentas,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Cargos,
        Collection::Empleados,
        Collection::Clientes,
        Collection::Categorias,
        Collection::Marcas,
        Collection::Productos,
        Collection::Ventas,
        Collection::DetalleVentas,
    ];

    /// Nombre físico de la colección (columna `collection` en Postgres).
    pub fn name(self) -> &'static str {
        match self {
            Collection::Cargos => "cargos",
            Collection::Empleados => "empleados",
            Collection::Clientes => "clientes",
            Collection::Categorias => "categorias",
            Collection::Marcas => "marcas",
            Collection::Productos => "productos",
            Collection::Ventas => "ventas",
            Collection::DetalleVentas => "detalleventas",
        }
    }

    /// Nombre singular usado en los mensajes de la API.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Cargos => "Cargo",
            Collection::Empleados => "Empleado",
            Collection::Clientes => "Cliente",
            Collection::Categorias => "Categoría",
            Collection::Marcas => "Marca",
            Collection::Productos => "Producto",
            Collection::Ventas => "Venta",
            Collection::DetalleVentas => "Detalle de venta",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            Collection::Cargos => &CARGO,
            Collection::Empleados => &EMPLEADO,
            Collection::Clientes => &CLIENTE,
            Collection::Categorias => &CATEGORIA,
            Collection::Marcas => &MARCA,
            Collection::Productos => &PRODUCTO,
            Collection::Ventas => &VENTA,
            Collection::DetalleVentas => &DETALLE_VENTA,
        }
    }
}

// ---
// Esquemas
// ---

static CARGO: Schema = Schema {
    collection: Collection::Cargos,
    fields: &[FieldSpec::text("nombre", None)],
    unique: &[],
};

static EMPLEADO: Schema = Schema {
    collection: Collection::Empleados,
    fields: &[
        FieldSpec::text("dni", Some(8)),
        FieldSpec::text("nombre", Some(150)),
        FieldSpec::text("telefono", Some(11)),
        FieldSpec::text("sexo", Some(1)),
        FieldSpec::text("direccion", Some(100)),
        FieldSpec::date("fecha_ingreso"),
        FieldSpec::number("salario"),
        FieldSpec::reference("idcargo", Collection::Cargos),
        FieldSpec::text("clave", Some(10)),
    ],
    unique: &[],
};

static CLIENTE: Schema = Schema {
    collection: Collection::Clientes,
    fields: &[
        FieldSpec::text("dni", Some(8)),
        FieldSpec::text("nombre", Some(150)),
        FieldSpec::text("telefono", Some(11)),
        FieldSpec::text("sexo", Some(1)),
        FieldSpec::date("fecha_naci"),
        FieldSpec::text("direccion", Some(100)),
    ],
    unique: &[],
};

static CATEGORIA: Schema = Schema {
    collection: Collection::Categorias,
    fields: &[
        FieldSpec::text("nombre", Some(200)),
        FieldSpec::text("descripcion", Some(100)),
    ],
    unique: &[],
};

static MARCA: Schema = Schema {
    collection: Collection::Marcas,
    fields: &[FieldSpec::text("nombre", Some(100))],
    unique: &[],
};

static PRODUCTO: Schema = Schema {
    collection: Collection::Productos,
    fields: &[
        FieldSpec::text("nombre", Some(100)),
        FieldSpec::number("costo"),
        FieldSpec::number("preciounit"),
        FieldSpec::number("stock"),
        FieldSpec::date("fecha_venci"),
        FieldSpec::reference("idmarca", Collection::Marcas),
        FieldSpec::reference("idcategoria", Collection::Categorias),
    ],
    unique: &[],
};

static VENTA: Schema = Schema {
    collection: Collection::Ventas,
    fields: &[
        FieldSpec::text("numventa", Some(4)),
        FieldSpec::date("fecha"),
        FieldSpec::reference("idempleado", Collection::Empleados),
        FieldSpec::reference("idcliente", Collection::Clientes),
    ],
    unique: &["numventa"],
};

// `idventa` guarda el `numventa` legado, no una referencia interna.
static DETALLE_VENTA: Schema = Schema {
    collection: Collection::DetalleVentas,
    fields: &[
        FieldSpec::text("idventa", None),
        FieldSpec::reference("idproducto", Collection::Productos),
        FieldSpec::number("cantidad"),
        FieldSpec::number("precio"),
    ],
    unique: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_schema_points_back_to_its_collection() {
        for collection in Collection::ALL {
            assert_eq!(collection.schema().collection, collection);
        }
    }

    #[test]
    fn collection_names_are_distinct() {
        let names: HashSet<_> = Collection::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), Collection::ALL.len());
    }

    #[test]
    fn only_ventas_declares_a_unique_field() {
        for collection in Collection::ALL {
            let unique = collection.schema().unique;
            if collection == Collection::Ventas {
                assert_eq!(unique, &["numventa"]);
            } else {
                assert!(unique.is_empty(), "{} no debería tener índice único", collection.name());
            }
        }
    }
}
