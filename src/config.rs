// src/config.rs

use std::{env, path::PathBuf, str::FromStr, sync::Arc};

use anyhow::Context;

use crate::{db::DocumentStore, services::CatalogService};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_LEGACY_DATABASE_URL: &str = "postgres://postgres@localhost:5432/db_ferreteria";

/// Configuración leída del entorno (y de `.env` si existe).
#[derive(Debug, Clone)]
pub struct Config {
    /// Cadena de conexión del document store. Obligatoria.
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    /// Carpeta del front-end estático.
    pub static_dir: PathBuf,
    /// Base relacional de origen; solo la usa `migrate`.
    pub legacy_database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .context("La variable de entorno DATABASE_URL no está definida. Crea un archivo .env con la cadena de conexión.")?;

        Ok(Self {
            database_url,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            legacy_database_url: lookup("LEGACY_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_LEGACY_DATABASE_URL.to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Valor inválido para {key}: '{raw}'")),
        None => Ok(default),
    }
}

// El estado compartido que será accesible en toda la aplicación
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub catalog_service: CatalogService,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self::with_static_dir(store, config.static_dir.clone())
    }

    pub fn with_static_dir(store: Arc<dyn DocumentStore>, static_dir: PathBuf) -> Self {
        // --- Monta el grafo de dependencias ---
        let catalog_service = CatalogService::new(store.clone());
        Self { store, catalog_service, static_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        assert!(Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).is_err());
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x/docs")])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.legacy_database_url, DEFAULT_LEGACY_DATABASE_URL);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x/docs"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("STATIC_DIR", "/srv/front"),
            ("LEGACY_DATABASE_URL", "postgres://legacy/db"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.static_dir, PathBuf::from("/srv/front"));
        assert_eq!(config.legacy_database_url, "postgres://legacy/db");
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x"), ("PORT", "abc")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
