//src/main.rs

use std::{net::SocketAddr, sync::Arc};

use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

use ferreteria::{
    config::{AppState, Config},
    db::{DocumentStore, PgDocumentStore},
    routes::app_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Sin cadena de conexión no hay nada que servir: se sale de inmediato.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let store = match PgDocumentStore::connect(&config.database_url, config.max_connections) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("🔥 DATABASE_URL inválida: {}", e);
            std::process::exit(1);
        }
    };

    // Sin base disponible la API igual arranca; `/health` muestra el estado.
    let schema_store = store.clone();
    tokio::spawn(async move { schema_store.run_migrations_until_ready().await });

    let app_state = AppState::new(store.clone(), &config);
    let app = app_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 API corriendo en http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("No se pudo instalar el handler de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Ctrl+C recibido, cerrando..."),
        _ = terminate => tracing::warn!("SIGTERM recibido, cerrando..."),
    }
}
