//src/bin/migrate.rs

use std::{error::Error, process::ExitCode, sync::Arc};

use tracing_subscriber::EnvFilter;

use ferreteria::{
    config::Config,
    db::{DocumentStore, LegacyRepository, PgDocumentStore},
    migration,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    tracing::info!("🚀 Iniciando script de migración PostgreSQL -> document store");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = match PgDocumentStore::connect(&config.database_url, config.max_connections) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("🔥 DATABASE_URL inválida: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = store.run_migrations().await {
        tracing::error!("🔥 Falla al conectar con el document store: {}", e);
        store.close().await;
        return ExitCode::FAILURE;
    }

    let legacy = match LegacyRepository::connect(&config.legacy_database_url).await {
        Ok(legacy) => legacy,
        Err(e) => {
            tracing::error!("🔥 Falla al conectar con PostgreSQL: {}", e);
            store.close().await;
            return ExitCode::FAILURE;
        }
    };

    match migration::execute(store, &legacy).await {
        Ok(summary) => {
            tracing::info!("✅ Migración completada exitosamente");
            summary.log();
            tracing::info!("🔌 Conexiones cerradas");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Error durante la migración ({}): {}", e.kind(), e);
            let mut cause = e.source();
            while let Some(inner) = cause {
                tracing::error!("   causado por: {}", inner);
                cause = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}
