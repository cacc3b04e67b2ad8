// src/migration.rs
//
// Migración única de la base relacional `db_ferreteria` al document store.

pub mod error;
pub mod pipeline;
pub mod source;

use std::sync::Arc;

pub use error::MigrationError;
pub use pipeline::{MigrationSummary, Migrator};
pub use source::LegacySource;

use crate::{db::DocumentStore, services::CatalogService};

/// Corre las cuatro etapas y, termine como termine, cierra ambas conexiones.
pub async fn execute(
    store: Arc<dyn DocumentStore>,
    source: &dyn LegacySource,
) -> Result<MigrationSummary, MigrationError> {
    let catalog = CatalogService::new(store.clone());
    let result = Migrator::new(source, &catalog).run().await;

    source.close().await;
    store.close().await;

    result
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::Value;

    use super::*;
    use crate::{
        common::error::AppError,
        db::MemoryStore,
        models::{
            health::ConnectionState,
            legacy::{
                CargoRow, CategoriaRow, ClienteRow, DetalleVentaRow, EmpleadoRow, MarcaRow,
                ProductoRow, VentaRow,
            },
            Collection,
        },
    };

    // Origen en memoria: `n` filas por tabla, claves 1..=n, cada fila
    // apunta a la de igual clave en la tabla referenciada.
    #[derive(Default)]
    struct FixtureSource {
        n: i32,
        empleado_idcargo: Option<i32>,
        categorias_sin_descripcion: bool,
        fail_on_marcas: bool,
        closed: AtomicBool,
    }

    impl FixtureSource {
        fn new(n: i32) -> Self {
            Self { n, ..Default::default() }
        }

        fn keys(&self) -> impl Iterator<Item = i32> {
            1..=self.n
        }

        fn date() -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        }
    }

    #[async_trait]
    impl LegacySource for FixtureSource {
        async fn cargos(&self) -> Result<Vec<CargoRow>, sqlx::Error> {
            Ok(self
                .keys()
                .map(|k| CargoRow { idcargo: k, nombre: format!("Cargo {k}") })
                .collect())
        }

        async fn categorias(&self) -> Result<Vec<CategoriaRow>, sqlx::Error> {
            Ok(self
                .keys()
                .map(|k| CategoriaRow {
                    idcategoria: k,
                    nombre: format!("Categoria {k}"),
                    descripcion: (!self.categorias_sin_descripcion)
                        .then(|| format!("Descripcion {k}")),
                })
                .collect())
        }

        async fn marcas(&self) -> Result<Vec<MarcaRow>, sqlx::Error> {
            if self.fail_on_marcas {
                return Err(sqlx::Error::RowNotFound);
            }
            Ok(self
                .keys()
                .map(|k| MarcaRow { idmarca: k, nombre: format!("Marca {k}") })
                .collect())
        }

        async fn empleados(&self) -> Result<Vec<EmpleadoRow>, sqlx::Error> {
            Ok(self
                .keys()
                .map(|k| EmpleadoRow {
                    idempleado: k,
                    dni: format!("4000000{k}"),
                    nombre: format!("Empleado {k}"),
                    telefono: "987654321".into(),
                    sexo: "M".into(),
                    direccion: "Av. Grau 300".into(),
                    fecha_ingreso: Self::date(),
                    salario: Decimal::new(150000, 2),
                    idcargo: self.empleado_idcargo.unwrap_or(k),
                    clave: "clave".into(),
                })
                .collect())
        }

        async fn clientes(&self) -> Result<Vec<ClienteRow>, sqlx::Error> {
            Ok(self
                .keys()
                .map(|k| ClienteRow {
                    idcliente: k,
                    dni: format!("7000000{k}"),
                    nombre: format!("Cliente {k}"),
                    telefono: "956321478".into(),
                    sexo: "F".into(),
                    fecha_naci: Self::date(),
                    direccion: "Calle Lima 210".into(),
                })
                .collect())
        }

        async fn productos(&self) -> Result<Vec<ProductoRow>, sqlx::Error> {
            Ok(self
                .keys()
                .map(|k| ProductoRow {
                    idproducto: k,
                    nombre: format!("Producto {k}"),
                    costo: Decimal::new(1850, 2),
                    preciounit: Decimal::new(2590, 2),
                    stock: 10 * k,
                    fecha_venci: Self::date(),
                    idmarca: k,
                    idcategoria: k,
                })
                .collect())
        }

        async fn ventas(&self) -> Result<Vec<VentaRow>, sqlx::Error> {
            Ok(self
                .keys()
                .map(|k| VentaRow {
                    numventa: format!("V{k:03}"),
                    fecha: Self::date(),
                    idempleado: k,
                    idcliente: k,
                })
                .collect())
        }

        async fn detalles_venta(&self) -> Result<Vec<DetalleVentaRow>, sqlx::Error> {
            Ok(self
                .keys()
                .map(|k| DetalleVentaRow {
                    idventa: format!("V{k:03}"),
                    idproducto: k,
                    cantidad: k,
                    precio: Decimal::new(2590, 2),
                })
                .collect())
        }

        async fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn nested_nombre(doc: &crate::models::Document, field: &str) -> String {
        doc[field]["nombre"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn migrates_every_table_and_remaps_foreign_keys() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(store.clone());
        let source = FixtureSource::new(3);

        let summary = Migrator::new(&source, &catalog).run().await.unwrap();

        assert_eq!(
            summary,
            MigrationSummary {
                cargos: 3,
                categorias: 3,
                marcas: 3,
                empleados: 3,
                clientes: 3,
                productos: 3,
                ventas: 3,
                detalles_venta: 3,
            }
        );
        for collection in Collection::ALL {
            assert_eq!(store.count(collection).await, 3, "{}", collection.name());
        }

        let empleados = catalog.list(Collection::Empleados).await.unwrap();
        for (i, empleado) in empleados.iter().enumerate() {
            assert_eq!(nested_nombre(empleado, "idcargo"), format!("Cargo {}", i + 1));
        }

        let productos = catalog.list(Collection::Productos).await.unwrap();
        for (i, producto) in productos.iter().enumerate() {
            assert_eq!(nested_nombre(producto, "idmarca"), format!("Marca {}", i + 1));
            assert_eq!(nested_nombre(producto, "idcategoria"), format!("Categoria {}", i + 1));
        }

        let ventas = catalog.list(Collection::Ventas).await.unwrap();
        assert_eq!(ventas[1]["numventa"], Value::from("V002"));
        assert_eq!(nested_nombre(&ventas[1], "idempleado"), "Empleado 2");
        assert_eq!(nested_nombre(&ventas[1], "idcliente"), "Cliente 2");

        // `idventa` sigue siendo el numventa; solo el producto cambia de clave.
        let detalles = catalog.list(Collection::DetalleVentas).await.unwrap();
        assert_eq!(detalles[2]["idventa"], Value::from("V003"));
        assert_eq!(nested_nombre(&detalles[2], "idproducto"), "Producto 3");
        assert_eq!(detalles[2]["cantidad"], Value::from(3));
    }

    #[tokio::test]
    async fn unmapped_foreign_key_aborts_the_run() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(store.clone());
        let source = FixtureSource { empleado_idcargo: Some(99), ..FixtureSource::new(2) };

        let err = Migrator::new(&source, &catalog).run().await.unwrap_err();

        match err {
            MigrationError::MissingReference { table, field, missing, .. } => {
                assert_eq!(table, "empleado");
                assert_eq!(field, "idcargo");
                assert_eq!(missing, 99);
            }
            other => panic!("error inesperado: {other:?}"),
        }
        // La etapa 1 ya quedó escrita; no hay rollback.
        assert_eq!(store.count(Collection::Cargos).await, 2);
        assert_eq!(store.count(Collection::Empleados).await, 0);
    }

    #[tokio::test]
    async fn null_category_description_aborts_the_run() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(store.clone());
        let source = FixtureSource { categorias_sin_descripcion: true, ..FixtureSource::new(1) };

        let err = Migrator::new(&source, &catalog).run().await.unwrap_err();

        match err {
            MigrationError::Store { collection, legacy_key, source: AppError::ValidationError(errors) } => {
                assert_eq!(collection, "categorias");
                assert_eq!(legacy_key, "1");
                assert_eq!(errors.field_errors()["descripcion"][0].code, "required");
            }
            other => panic!("error inesperado: {other:?}"),
        }
        assert_eq!(store.count(Collection::Categorias).await, 0);
    }

    #[tokio::test]
    async fn second_run_duplicates_roots_and_stops_at_sales() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(store.clone());
        let source = FixtureSource::new(2);

        Migrator::new(&source, &catalog).run().await.unwrap();
        let err = Migrator::new(&source, &catalog).run().await.unwrap_err();

        match err {
            MigrationError::Store { collection, legacy_key, source } => {
                assert_eq!(collection, "ventas");
                assert_eq!(legacy_key, "V001");
                assert!(matches!(source, AppError::DuplicateKey { field: "numventa", .. }));
            }
            other => panic!("error inesperado: {other:?}"),
        }
        assert_eq!(stage_counts(&store).await, (4, 4, 2, 2));
    }

    async fn stage_counts(store: &MemoryStore) -> (usize, usize, usize, usize) {
        (
            store.count(Collection::Cargos).await,
            store.count(Collection::Productos).await,
            store.count(Collection::Ventas).await,
            store.count(Collection::DetalleVentas).await,
        )
    }

    #[tokio::test]
    async fn execute_closes_both_connections_on_failure() {
        let store = Arc::new(MemoryStore::new());
        let source = FixtureSource { fail_on_marcas: true, ..FixtureSource::new(1) };

        let err = execute(store.clone(), &source).await.unwrap_err();

        assert!(matches!(err, MigrationError::Source { table: "marca", .. }));
        assert_eq!(err.kind(), "lectura");
        assert!(source.closed.load(Ordering::SeqCst));
        assert_eq!(store.connection_state().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn execute_returns_the_summary() {
        let store = Arc::new(MemoryStore::new());
        let source = FixtureSource::new(1);

        let summary = execute(store.clone(), &source).await.unwrap();

        assert_eq!(summary.detalles_venta, 1);
        assert!(source.closed.load(Ordering::SeqCst));
    }
}
