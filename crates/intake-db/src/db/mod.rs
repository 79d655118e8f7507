//! Store contract and repository implementations
//
// Contract shared by every backend
pub mod store;
//
// PostgreSQL-backed import repository
pub mod imports;
//
// Process-local store (tests and local development only)
#[cfg(feature = "memory")]
pub mod memory;
//
// Embedded schema migrations
pub mod migrate;

pub use imports::PostgresImportRepository;
#[cfg(feature = "memory")]
pub use memory::InMemoryImportStore;
pub use migrate::{run_migrations, MIGRATOR};
pub use store::ImportStore;
