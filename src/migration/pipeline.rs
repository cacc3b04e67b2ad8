// src/migration/pipeline.rs
//
// Copia tabla por tabla, en orden de dependencias:
//
//   (cargo, categoria, marca) -> (empleado, cliente, producto) -> venta -> detalle_venta
//
// Cada etapa recibe los mapas de ids de la anterior, así que el orden lo
// imponen los tipos y no la posición de las llamadas. La primera falla
// aborta todo; no hay reintentos ni rollback.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    migration::{LegacySource, MigrationError},
    models::{
        entities::{
            to_document, Cargo, Categoria, Cliente, DetalleVenta, Empleado, Marca, Producto, Venta,
        },
        schema::document_id,
        Collection,
    },
    services::CatalogService,
};

/// Clave primaria legada -> `_id` nuevo.
pub type IdMap = HashMap<i32, Uuid>;

/// Resultado de la etapa 1.
#[derive(Debug, Default)]
pub struct RootIds {
    cargos: IdMap,
    categorias: IdMap,
    marcas: IdMap,
}

/// Resultado de la etapa 2.
#[derive(Debug, Default)]
pub struct PartyIds {
    empleados: IdMap,
    clientes: IdMap,
    productos: IdMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    pub cargos: usize,
    pub categorias: usize,
    pub marcas: usize,
    pub empleados: usize,
    pub clientes: usize,
    pub productos: usize,
    pub ventas: usize,
    pub detalles_venta: usize,
}

impl MigrationSummary {
    pub fn log(&self) {
        tracing::info!("📊 Resumen:");
        tracing::info!("   - Cargos: {}", self.cargos);
        tracing::info!("   - Categorías: {}", self.categorias);
        tracing::info!("   - Marcas: {}", self.marcas);
        tracing::info!("   - Empleados: {}", self.empleados);
        tracing::info!("   - Clientes: {}", self.clientes);
        tracing::info!("   - Productos: {}", self.productos);
        tracing::info!("   - Ventas: {}", self.ventas);
        tracing::info!("   - Detalles de venta: {}", self.detalles_venta);
    }
}

pub struct Migrator<'a> {
    source: &'a dyn LegacySource,
    catalog: &'a CatalogService,
}

impl<'a> Migrator<'a> {
    pub fn new(source: &'a dyn LegacySource, catalog: &'a CatalogService) -> Self {
        Self { source, catalog }
    }

    pub async fn run(&self) -> Result<MigrationSummary, MigrationError> {
        let roots = self.migrate_roots().await?;
        let parties = self.migrate_parties_and_products(&roots).await?;
        let ventas = self.migrate_sales(&parties).await?;
        let detalles_venta = self.migrate_sale_items(&parties).await?;

        Ok(MigrationSummary {
            cargos: roots.cargos.len(),
            categorias: roots.categorias.len(),
            marcas: roots.marcas.len(),
            empleados: parties.empleados.len(),
            clientes: parties.clientes.len(),
            productos: parties.productos.len(),
            ventas,
            detalles_venta,
        })
    }

    // ---
    // Etapa 1: cargo, categoria, marca
    // ---
    pub async fn migrate_roots(&self) -> Result<RootIds, MigrationError> {
        let mut ids = RootIds::default();

        let rows = read("cargo", self.source.cargos()).await?;
        for row in rows {
            let key = row.idcargo.to_string();
            let id = self
                .insert(Collection::Cargos, &key, &Cargo { nombre: row.nombre.clone() })
                .await?;
            tracing::info!("  ✓ Cargo migrado: {} (ID: {} -> {})", row.nombre, row.idcargo, id);
            ids.cargos.insert(row.idcargo, id);
        }

        let rows = read("categoria", self.source.categorias()).await?;
        for row in rows {
            let key = row.idcategoria.to_string();
            // Un NULL de origen queda vacío y lo rechaza la validación.
            let categoria = Categoria {
                nombre: row.nombre,
                descripcion: row.descripcion.unwrap_or_default(),
            };
            let id = self.insert(Collection::Categorias, &key, &categoria).await?;
            tracing::info!("  ✓ Categoría migrada: {}", categoria.nombre);
            ids.categorias.insert(row.idcategoria, id);
        }

        let rows = read("marca", self.source.marcas()).await?;
        for row in rows {
            let key = row.idmarca.to_string();
            let id = self
                .insert(Collection::Marcas, &key, &Marca { nombre: row.nombre.clone() })
                .await?;
            tracing::info!("  ✓ Marca migrada: {}", row.nombre);
            ids.marcas.insert(row.idmarca, id);
        }

        Ok(ids)
    }

    // ---
    // Etapa 2: empleado, cliente, producto
    // ---
    pub async fn migrate_parties_and_products(
        &self,
        roots: &RootIds,
    ) -> Result<PartyIds, MigrationError> {
        let mut ids = PartyIds::default();

        let rows = read("empleado", self.source.empleados()).await?;
        for row in rows {
            let key = row.idempleado.to_string();
            let empleado = Empleado {
                idcargo: remap(&roots.cargos, "empleado", &key, "idcargo", row.idcargo)?,
                dni: row.dni,
                nombre: row.nombre,
                telefono: row.telefono,
                sexo: row.sexo,
                direccion: row.direccion,
                fecha_ingreso: row.fecha_ingreso,
                salario: row.salario,
                clave: row.clave,
            };
            let id = self.insert(Collection::Empleados, &key, &empleado).await?;
            tracing::info!("  ✓ Empleado migrado: {}", empleado.nombre);
            ids.empleados.insert(row.idempleado, id);
        }

        let rows = read("cliente", self.source.clientes()).await?;
        for row in rows {
            let key = row.idcliente.to_string();
            let cliente = Cliente {
                dni: row.dni,
                nombre: row.nombre,
                telefono: row.telefono,
                sexo: row.sexo,
                fecha_naci: row.fecha_naci,
                direccion: row.direccion,
            };
            let id = self.insert(Collection::Clientes, &key, &cliente).await?;
            tracing::info!("  ✓ Cliente migrado: {}", cliente.nombre);
            ids.clientes.insert(row.idcliente, id);
        }

        let rows = read("producto", self.source.productos()).await?;
        for row in rows {
            let key = row.idproducto.to_string();
            let producto = Producto {
                idmarca: remap(&roots.marcas, "producto", &key, "idmarca", row.idmarca)?,
                idcategoria: remap(&roots.categorias, "producto", &key, "idcategoria", row.idcategoria)?,
                nombre: row.nombre,
                costo: row.costo,
                preciounit: row.preciounit,
                stock: row.stock,
                fecha_venci: row.fecha_venci,
            };
            let id = self.insert(Collection::Productos, &key, &producto).await?;
            tracing::info!("  ✓ Producto migrado: {}", producto.nombre);
            ids.productos.insert(row.idproducto, id);
        }

        Ok(ids)
    }

    // ---
    // Etapa 3: venta (conserva `numventa`)
    // ---
    pub async fn migrate_sales(&self, parties: &PartyIds) -> Result<usize, MigrationError> {
        let rows = read("venta", self.source.ventas()).await?;
        let total = rows.len();

        for row in rows {
            let venta = Venta {
                idempleado: remap(&parties.empleados, "venta", &row.numventa, "idempleado", row.idempleado)?,
                idcliente: remap(&parties.clientes, "venta", &row.numventa, "idcliente", row.idcliente)?,
                numventa: row.numventa,
                fecha: row.fecha,
            };
            self.insert(Collection::Ventas, &venta.numventa, &venta).await?;
            tracing::info!("  ✓ Venta migrada: {}", venta.numventa);
        }

        Ok(total)
    }

    // ---
    // Etapa 4: detalle_venta (`idventa` queda como numventa; solo se remapea el producto)
    // ---
    pub async fn migrate_sale_items(&self, parties: &PartyIds) -> Result<usize, MigrationError> {
        let rows = read("detalle_venta", self.source.detalles_venta()).await?;
        let total = rows.len();

        for row in rows {
            let key = format!("{}/{}", row.idventa, row.idproducto);
            let detalle = DetalleVenta {
                idproducto: remap(&parties.productos, "detalle_venta", &key, "idproducto", row.idproducto)?,
                idventa: row.idventa,
                cantidad: row.cantidad,
                precio: row.precio,
            };
            self.insert(Collection::DetalleVentas, &key, &detalle).await?;
            tracing::info!(
                "  ✓ Detalle venta migrado: {} - Producto ID: {}",
                detalle.idventa,
                row.idproducto
            );
        }

        Ok(total)
    }

    async fn insert<T: Serialize>(
        &self,
        collection: Collection,
        legacy_key: &str,
        entity: &T,
    ) -> Result<Uuid, MigrationError> {
        let document = to_document(entity)?;

        let stored = self
            .catalog
            .create(collection, document)
            .await
            .map_err(|source| MigrationError::Store {
                collection: collection.name(),
                legacy_key: legacy_key.to_string(),
                source,
            })?;

        document_id(&stored).ok_or_else(|| MigrationError::MissingId {
            table: collection.name(),
            legacy_key: legacy_key.to_string(),
        })
    }
}

async fn read<T>(
    table: &'static str,
    rows: impl std::future::Future<Output = Result<Vec<T>, sqlx::Error>>,
) -> Result<Vec<T>, MigrationError> {
    tracing::info!("📦 Migrando {}...", table);
    let rows = rows
        .await
        .map_err(|source| MigrationError::Source { table, source })?;
    tracing::info!("   Encontrados: {} registros", rows.len());
    Ok(rows)
}

fn remap(
    map: &IdMap,
    table: &'static str,
    legacy_key: &str,
    field: &'static str,
    old: i32,
) -> Result<Uuid, MigrationError> {
    map.get(&old)
        .copied()
        .ok_or_else(|| MigrationError::MissingReference {
            table,
            legacy_key: legacy_key.to_string(),
            field,
            missing: old,
        })
}
