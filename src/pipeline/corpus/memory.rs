use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::types::FragmentStore;
use super::CorpusError;
use crate::models::{Fragment, ShapeKey};

/// In-memory fragment store. `RwLock` lets generation queries proceed in
/// parallel while ingestion writers briefly take the write lock.
pub struct MemoryStore {
    inner: RwLock<Buckets>,
}

#[derive(Default)]
struct Buckets {
    by_shape: HashMap<ShapeKey, Vec<Fragment>>,
    by_length: HashMap<usize, Vec<Fragment>>,
    seen: HashSet<(String, String, usize)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Buckets::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentStore for MemoryStore {
    fn insert(&self, fragment: Fragment) -> Result<bool, CorpusError> {
        let mut buckets = self.inner.write().map_err(|_| CorpusError::LockPoisoned)?;

        let key = (
            fragment.text.clone(),
            fragment.source_doc_id.clone(),
            fragment.token_offset,
        );
        if !buckets.seen.insert(key) {
            return Ok(false);
        }

        buckets
            .by_length
            .entry(fragment.token_length)
            .or_default()
            .push(fragment.clone());
        buckets
            .by_shape
            .entry(fragment.shape.clone())
            .or_default()
            .push(fragment);
        Ok(true)
    }

    fn by_shape(&self, shape: &ShapeKey) -> Result<Vec<Fragment>, CorpusError> {
        let buckets = self.inner.read().map_err(|_| CorpusError::LockPoisoned)?;
        Ok(buckets.by_shape.get(shape).cloned().unwrap_or_default())
    }

    fn by_length(&self, token_length: usize) -> Result<Vec<Fragment>, CorpusError> {
        let buckets = self.inner.read().map_err(|_| CorpusError::LockPoisoned)?;
        Ok(buckets
            .by_length
            .get(&token_length)
            .cloned()
            .unwrap_or_default())
    }

    fn all(&self) -> Result<Vec<Fragment>, CorpusError> {
        let buckets = self.inner.read().map_err(|_| CorpusError::LockPoisoned)?;
        Ok(buckets.by_shape.values().flatten().cloned().collect())
    }

    fn count(&self) -> Result<usize, CorpusError> {
        let buckets = self.inner.read().map_err(|_| CorpusError::LockPoisoned)?;
        Ok(buckets.seen.len())
    }
}
