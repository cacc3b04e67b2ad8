pub mod document_store;
pub use document_store::{DocumentStore, Merge};
pub mod pg_store;
pub use pg_store::PgDocumentStore;
pub mod memory_store;
pub use memory_store::MemoryStore;
pub mod legacy_repo;
pub use legacy_repo::LegacyRepository;
