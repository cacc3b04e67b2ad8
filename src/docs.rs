// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Ferretería API", description = "CRUD de la ferretería sobre el document store"),
    paths(
        // --- Health ---
        handlers::health::health_check,

        // --- Personal ---
        handlers::staff::list_cargos,
        handlers::staff::create_cargo,
        handlers::staff::list_empleados,
        handlers::staff::get_empleado,
        handlers::staff::create_empleado,
        handlers::staff::update_empleado,
        handlers::staff::delete_empleado,

        // --- Clientes ---
        handlers::clients::list_clientes,
        handlers::clients::get_cliente,
        handlers::clients::create_cliente,
        handlers::clients::update_cliente,
        handlers::clients::delete_cliente,

        // --- Catálogo ---
        handlers::catalog::list_categorias,
        handlers::catalog::create_categoria,
        handlers::catalog::list_marcas,
        handlers::catalog::create_marca,
        handlers::catalog::list_productos,
        handlers::catalog::get_producto,
        handlers::catalog::create_producto,
        handlers::catalog::update_producto,
        handlers::catalog::delete_producto,

        // --- Ventas ---
        handlers::sales::list_ventas,
        handlers::sales::create_venta,
        handlers::sales::list_detalle_ventas,
        handlers::sales::create_detalle_venta,
    ),
    components(
        schemas(
            models::entities::Cargo,
            models::entities::Empleado,
            models::entities::Cliente,
            models::entities::Categoria,
            models::entities::Marca,
            models::entities::Producto,
            models::entities::Venta,
            models::entities::DetalleVenta,
            models::entities::MessageResponse,
            models::health::HealthStatus,
        )
    ),
    tags(
        (name = "Health", description = "Estado del servicio"),
        (name = "Cargos", description = "Cargos del personal"),
        (name = "Empleados", description = "Gestión de empleados"),
        (name = "Clientes", description = "Gestión de clientes"),
        (name = "Categorías", description = "Categorías de productos"),
        (name = "Marcas", description = "Marcas de productos"),
        (name = "Productos", description = "Catálogo de productos"),
        (name = "Ventas", description = "Ventas y sus detalles")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/cargos",
            "/empleados",
            "/empleados/{id}",
            "/clientes",
            "/clientes/{id}",
            "/categorias",
            "/marcas",
            "/productos",
            "/productos/{id}",
            "/ventas",
            "/detalle-ventas",
        ] {
            assert!(paths.contains(&expected), "falta documentar {expected}");
        }
    }
}
