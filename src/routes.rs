// src/routes.rs

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Router completo de la API: entidades, health, docs y front-end estático.
pub fn app_router(app_state: AppState) -> Router {
    let static_dir = app_state.static_dir.clone();

    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Personal
        .route(
            "/cargos",
            get(handlers::staff::list_cargos).post(handlers::staff::create_cargo),
        )
        .route(
            "/empleados",
            get(handlers::staff::list_empleados).post(handlers::staff::create_empleado),
        )
        .route(
            "/empleados/{id}",
            get(handlers::staff::get_empleado)
                .put(handlers::staff::update_empleado)
                .delete(handlers::staff::delete_empleado),
        )
        // Clientes
        .route(
            "/clientes",
            get(handlers::clients::list_clientes).post(handlers::clients::create_cliente),
        )
        .route(
            "/clientes/{id}",
            get(handlers::clients::get_cliente)
                .put(handlers::clients::update_cliente)
                .delete(handlers::clients::delete_cliente),
        )
        // Catálogo
        .route(
            "/categorias",
            get(handlers::catalog::list_categorias).post(handlers::catalog::create_categoria),
        )
        .route(
            "/marcas",
            get(handlers::catalog::list_marcas).post(handlers::catalog::create_marca),
        )
        .route(
            "/productos",
            get(handlers::catalog::list_productos).post(handlers::catalog::create_producto),
        )
        .route(
            "/productos/{id}",
            get(handlers::catalog::get_producto)
                .put(handlers::catalog::update_producto)
                .delete(handlers::catalog::delete_producto),
        )
        // Ventas
        .route(
            "/ventas",
            get(handlers::sales::list_ventas).post(handlers::sales::create_venta),
        )
        .route(
            "/detalle-ventas",
            get(handlers::sales::list_detalle_ventas).post(handlers::sales::create_detalle_venta),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // `/` sirve public/index.html
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
