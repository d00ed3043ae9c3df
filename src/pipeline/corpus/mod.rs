pub mod memory;
pub mod query;
pub mod sqlite_store;
pub mod types;

pub use memory::MemoryStore;
pub use query::query;
pub use sqlite_store::SqliteStore;
pub use types::FragmentStore;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum CorpusError {
    /// No eligible fragment exists even after all fallback tiers and
    /// exclusions. Fatal for the generation call that hit it.
    #[error("No eligible fragment in the index")]
    EmptyIndex,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Internal lock error")]
    LockPoisoned,
}
