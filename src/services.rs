pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod expansion;
