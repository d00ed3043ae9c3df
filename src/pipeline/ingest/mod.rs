//! Ingestion path: raw text → tagger → shape classifier → fragment store.
//!
//! Single documents ingest atomically from the caller's point of view;
//! batch jobs isolate failures per document so one unreadable scrape
//! never sinks its siblings.

use std::time::Instant;

use thiserror::Error;

use super::classify::{self, ClassifyConfig, TagMapper};
use super::corpus::{CorpusError, FragmentStore};
use crate::tagger::{Tagger, TaggerError};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Tagging failed: {0}")]
    Tagger(#[from] TaggerError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

/// Progress events for batch ingestion.
#[derive(Debug, Clone)]
pub enum IngestEvent {
    Started { document_count: u32 },
    Progress {
        completed: u32,
        total: u32,
        current_doc: String,
    },
    Completed {
        fragments_added: u32,
        duration_ms: u64,
    },
}

/// Outcome of a batch ingestion run.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub documents_processed: u32,
    pub documents_failed: u32,
    pub fragments_added: u32,
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

impl BatchResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Ingest one document: tag, classify every sentence, insert fragments.
/// Returns the number of fragments actually added (duplicates rejected
/// by the store are not counted).
pub fn ingest_document(
    tagger: &dyn Tagger,
    mapper: &dyn TagMapper,
    cfg: &ClassifyConfig,
    store: &dyn FragmentStore,
    raw_text: &str,
    source_doc_id: &str,
) -> Result<usize, IngestError> {
    let sentences = tagger.tag(raw_text)?;

    let mut added = 0;
    let mut rejected = 0;
    for sentence in &sentences {
        for fragment in classify::classify(sentence, mapper, cfg, source_doc_id) {
            if store.insert(fragment)? {
                added += 1;
            } else {
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        tracing::debug!(
            source_doc_id,
            rejected,
            "Duplicate fragments rejected during ingestion"
        );
    }
    tracing::info!(
        source_doc_id,
        sentences = sentences.len(),
        added,
        "Ingested document"
    );

    Ok(added)
}

/// Ingest a batch of `(source_doc_id, raw_text)` documents.
///
/// A document that fails tagging is recorded in `BatchResult::errors`
/// and skipped; corpus errors also stay per-document, so a transient
/// store failure costs one document, not the batch.
pub fn ingest_batch(
    tagger: &dyn Tagger,
    mapper: &dyn TagMapper,
    cfg: &ClassifyConfig,
    store: &dyn FragmentStore,
    documents: &[(String, String)],
    progress_fn: Option<&dyn Fn(IngestEvent)>,
) -> BatchResult {
    let start = Instant::now();
    let mut result = BatchResult::empty();

    if documents.is_empty() {
        return result;
    }

    let total = documents.len() as u32;
    if let Some(progress) = progress_fn {
        progress(IngestEvent::Started {
            document_count: total,
        });
    }

    for (i, (doc_id, raw_text)) in documents.iter().enumerate() {
        if let Some(progress) = progress_fn {
            progress(IngestEvent::Progress {
                completed: i as u32,
                total,
                current_doc: doc_id.clone(),
            });
        }

        match ingest_document(tagger, mapper, cfg, store, raw_text, doc_id) {
            Ok(added) => {
                result.documents_processed += 1;
                result.fragments_added += added as u32;
            }
            Err(e) => {
                tracing::warn!(source_doc_id = doc_id, error = %e, "Document ingestion failed");
                result.documents_failed += 1;
                result.errors.push(format!("{doc_id}: {e}"));
            }
        }
    }

    result.duration_ms = start.elapsed().as_millis() as u64;

    if let Some(progress) = progress_fn {
        progress(IngestEvent::Completed {
            fragments_added: result.fragments_added,
            duration_ms: result.duration_ms,
        });
    }

    result
}
