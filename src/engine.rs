//! Engine façade wiring tagger, classifier and fragment store.
//!
//! There is no hidden global corpus handle: the caller constructs the
//! store (in-memory or SQLite-backed), hands it to the engine, and
//! controls its lifetime. Ingestion and generation entry points both
//! borrow the same injected store.

use std::sync::Arc;

use rand::Rng;

use crate::models::Poem;
use crate::pipeline::classify::{ClassifyConfig, PennTagMapper, TagMapper};
use crate::pipeline::corpus::FragmentStore;
use crate::pipeline::generate::{self, CancelToken, GenerateError, Template};
use crate::pipeline::ingest::{self, BatchResult, IngestError, IngestEvent};
use crate::tagger::Tagger;

pub struct CutupEngine {
    tagger: Box<dyn Tagger>,
    mapper: Box<dyn TagMapper>,
    store: Arc<dyn FragmentStore>,
    classify_cfg: ClassifyConfig,
}

impl CutupEngine {
    /// Engine with the default Penn mapping and span range.
    pub fn new(tagger: Box<dyn Tagger>, store: Arc<dyn FragmentStore>) -> Self {
        Self {
            tagger,
            mapper: Box::new(PennTagMapper),
            store,
            classify_cfg: ClassifyConfig::default(),
        }
    }

    /// Override the fragment span range.
    pub fn with_classify_config(mut self, cfg: ClassifyConfig) -> Self {
        self.classify_cfg = cfg;
        self
    }

    /// Override the fine-to-coarse mapping (the granularity knob).
    pub fn with_mapper(mut self, mapper: Box<dyn TagMapper>) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn store(&self) -> &Arc<dyn FragmentStore> {
        &self.store
    }

    /// Ingest one document. Returns the fragment count added after dedup.
    pub fn ingest(&self, raw_text: &str, source_doc_id: &str) -> Result<usize, IngestError> {
        ingest::ingest_document(
            self.tagger.as_ref(),
            self.mapper.as_ref(),
            &self.classify_cfg,
            self.store.as_ref(),
            raw_text,
            source_doc_id,
        )
    }

    /// Ingest `(source_doc_id, raw_text)` documents with per-document
    /// failure isolation.
    pub fn ingest_batch(
        &self,
        documents: &[(String, String)],
        progress_fn: Option<&dyn Fn(IngestEvent)>,
    ) -> BatchResult {
        ingest::ingest_batch(
            self.tagger.as_ref(),
            self.mapper.as_ref(),
            &self.classify_cfg,
            self.store.as_ref(),
            documents,
            progress_fn,
        )
    }

    /// Generate a poem. `seed: None` draws a fresh seed from OS entropy;
    /// either way the seed used is recorded on the poem so any run can
    /// be replayed.
    pub fn generate(&self, template: &Template, seed: Option<u64>) -> Result<Poem, GenerateError> {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        generate::generate(template, self.store.as_ref(), seed, None)
    }

    /// Generate with a cancellation token checked between lines.
    pub fn generate_cancellable(
        &self,
        template: &Template,
        seed: Option<u64>,
        cancel: &CancelToken,
    ) -> Result<Poem, GenerateError> {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        generate::generate(template, self.store.as_ref(), seed, Some(cancel))
    }

    /// Parse a JSON template spec and generate in one call.
    pub fn generate_from_spec(
        &self,
        template_spec: &str,
        seed: Option<u64>,
    ) -> Result<Poem, GenerateError> {
        let template = Template::parse(template_spec)?;
        self.generate(&template, seed)
    }
}
