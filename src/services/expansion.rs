// src/services/expansion.rs
//
// Expansión de referencias como un join explícito: se buscan los documentos
// primarios, se juntan los ids referenciados, se traen en UN lote por campo
// y se reemplaza cada referencia por `{ _id, <campos elegidos> }` (o `null`
// si ya no existe).

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DocumentStore,
    models::{
        schema::{document_id, parse_id, ID_FIELD},
        Collection, Document,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    pub field: &'static str,
    pub target: Collection,
    pub select: &'static [&'static str],
}

const EMPLEADO: &[Expansion] = &[Expansion {
    field: "idcargo",
    target: Collection::Cargos,
    select: &["nombre"],
}];

const PRODUCTO: &[Expansion] = &[
    Expansion { field: "idmarca", target: Collection::Marcas, select: &["nombre"] },
    Expansion {
        field: "idcategoria",
        target: Collection::Categorias,
        select: &["nombre", "descripcion"],
    },
];

const VENTA: &[Expansion] = &[
    Expansion { field: "idempleado", target: Collection::Empleados, select: &["nombre"] },
    Expansion { field: "idcliente", target: Collection::Clientes, select: &["nombre"] },
];

const DETALLE_VENTA: &[Expansion] = &[Expansion {
    field: "idproducto",
    target: Collection::Productos,
    select: &["nombre", "costo"],
}];

/// Referencias que se expanden al leer cada colección.
pub fn expansions_for(collection: Collection) -> &'static [Expansion] {
    match collection {
        Collection::Empleados => EMPLEADO,
        Collection::Productos => PRODUCTO,
        Collection::Ventas => VENTA,
        Collection::DetalleVentas => DETALLE_VENTA,
        Collection::Cargos | Collection::Clientes | Collection::Categorias | Collection::Marcas => &[],
    }
}

pub async fn expand(
    store: &dyn DocumentStore,
    documents: &mut [Document],
    expansions: &[Expansion],
) -> Result<(), AppError> {
    for expansion in expansions {
        let ids: Vec<Uuid> = documents
            .iter()
            .filter_map(|doc| doc.get(expansion.field).and_then(Value::as_str).and_then(parse_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let referenced: HashMap<Uuid, Value> = store
            .find_many(expansion.target, &ids)
            .await?
            .iter()
            .filter_map(|doc| document_id(doc).map(|id| (id, project(doc, expansion.select))))
            .collect();

        for doc in documents.iter_mut() {
            let Some(slot) = doc.get_mut(expansion.field) else { continue };
            let resolved = slot
                .as_str()
                .and_then(parse_id)
                .and_then(|id| referenced.get(&id).cloned());
            *slot = resolved.unwrap_or(Value::Null);
        }
    }
    Ok(())
}

fn project(document: &Document, select: &[&str]) -> Value {
    let mut projected = Document::new();
    for &field in std::iter::once(&ID_FIELD).chain(select) {
        if let Some(value) = document.get(field) {
            projected.insert(field.to_string(), value.clone());
        }
    }
    Value::Object(projected)
}
