use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use super::types::FragmentStore;
use super::CorpusError;
use crate::db;
use crate::models::{Fragment, ShapeKey};

/// SQLite-backed fragment store over the corpus schema. The connection
/// sits behind a `Mutex` so one store can be shared by ingestion workers
/// and generation calls; SQLite serializes the actual statements anyway.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (and migrate) a file-backed corpus database.
    pub fn open(path: &Path) -> Result<Self, CorpusError> {
        let conn = db::open_database(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory corpus, for testing and throwaway runs.
    pub fn in_memory() -> Result<Self, CorpusError> {
        let conn = db::open_memory_database()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Wrap an already-opened connection (caller ran migrations).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CorpusError> {
        self.conn.lock().map_err(|_| CorpusError::LockPoisoned)
    }
}

impl FragmentStore for SqliteStore {
    fn insert(&self, fragment: Fragment) -> Result<bool, CorpusError> {
        let conn = self.lock()?;
        Ok(db::insert_fragment(&conn, &fragment)?)
    }

    fn by_shape(&self, shape: &ShapeKey) -> Result<Vec<Fragment>, CorpusError> {
        let conn = self.lock()?;
        Ok(db::fragments_by_shape(&conn, shape)?)
    }

    fn by_length(&self, token_length: usize) -> Result<Vec<Fragment>, CorpusError> {
        let conn = self.lock()?;
        Ok(db::fragments_by_length(&conn, token_length)?)
    }

    fn all(&self) -> Result<Vec<Fragment>, CorpusError> {
        let conn = self.lock()?;
        Ok(db::all_fragments(&conn)?)
    }

    fn count(&self) -> Result<usize, CorpusError> {
        let conn = self.lock()?;
        Ok(db::count_fragments(&conn)?)
    }
}
