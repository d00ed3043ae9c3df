use super::CorpusError;
use crate::models::{Fragment, ShapeKey};

/// Bucketed fragment storage: by shape key and by token length.
///
/// Buckets are append-only multisets; there is no deletion. Stores must
/// tolerate concurrent writers (parallel ingestion workers) and
/// concurrent readers (generation queries); a query may or may not
/// observe a fragment inserted moments earlier by another thread.
pub trait FragmentStore: Send + Sync {
    /// Append a fragment to its shape and length buckets. Returns
    /// `false` when an identical `(text, source_doc_id, token_offset)`
    /// fragment is already stored (silent dedup), `true` otherwise.
    fn insert(&self, fragment: Fragment) -> Result<bool, CorpusError>;

    fn by_shape(&self, shape: &ShapeKey) -> Result<Vec<Fragment>, CorpusError>;

    fn by_length(&self, token_length: usize) -> Result<Vec<Fragment>, CorpusError>;

    fn all(&self) -> Result<Vec<Fragment>, CorpusError>;

    fn count(&self) -> Result<usize, CorpusError>;
}
