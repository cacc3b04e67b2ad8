//! API REST de la ferretería sobre un document store (Postgres/JSONB) y la
//! migración única desde la base relacional original.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod routes;
pub mod services;
