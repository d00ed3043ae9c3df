use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shape::ShapeKey;
use crate::config;

/// A contiguous token span extracted from one sentence of a scraped
/// document. Immutable once created; owned by the fragment store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub id: Uuid,
    /// Exact byte slice of the source sentence, spacing and punctuation
    /// preserved.
    pub text: String,
    pub shape: ShapeKey,
    pub token_length: usize,
    pub source_doc_id: String,
    /// Index of the span's first token, counted from the start of the
    /// source document.
    pub token_offset: usize,
    pub mapping_version: i64,
    pub ingested_at: NaiveDateTime,
}

impl Fragment {
    /// Build a fragment. `token_length` is derived from the shape so the
    /// `shape.len() == token_length` invariant holds by construction.
    pub fn new(text: String, shape: ShapeKey, source_doc_id: String, token_offset: usize) -> Self {
        let token_length = shape.len();
        Self {
            id: Uuid::new_v4(),
            text,
            shape,
            token_length,
            source_doc_id,
            token_offset,
            mapping_version: config::SHAPE_MAPPING_VERSION,
            ingested_at: chrono::Local::now().naive_local(),
        }
    }

    /// Identity used for dedup: two fragments with the same text, source
    /// document and token offset are the same scraped span.
    pub fn dedup_key(&self) -> (&str, &str, usize) {
        (&self.text, &self.source_doc_id, self.token_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shape::PosCategory;

    #[test]
    fn token_length_matches_shape() {
        let shape = ShapeKey::new(vec![PosCategory::Det, PosCategory::Noun]);
        let frag = Fragment::new("the cat".into(), shape, "doc-1".into(), 0);
        assert_eq!(frag.token_length, 2);
        assert_eq!(frag.shape.len(), frag.token_length);
    }

    #[test]
    fn fresh_fragments_get_distinct_ids() {
        let shape = ShapeKey::new(vec![PosCategory::Noun]);
        let a = Fragment::new("cat".into(), shape.clone(), "doc-1".into(), 1);
        let b = Fragment::new("cat".into(), shape, "doc-1".into(), 1);
        assert_ne!(a.id, b.id);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_distinguishes_offsets() {
        let shape = ShapeKey::new(vec![PosCategory::Noun]);
        let a = Fragment::new("cat".into(), shape.clone(), "doc-1".into(), 1);
        let b = Fragment::new("cat".into(), shape, "doc-1".into(), 9);
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn carries_current_mapping_version() {
        let shape = ShapeKey::new(vec![PosCategory::Noun]);
        let frag = Fragment::new("cat".into(), shape, "doc-1".into(), 0);
        assert_eq!(frag.mapping_version, config::SHAPE_MAPPING_VERSION);
    }
}
