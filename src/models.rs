pub mod collection;
pub mod entities;
pub mod health;
pub mod legacy;
pub mod schema;

pub use collection::Collection;
pub use schema::Document;
