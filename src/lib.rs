//! Cento: a cut-up poetry engine.
//!
//! Ingests scraped prose, classifies sentence fragments by grammatical
//! shape, and assembles new poems by sampling a shape-indexed corpus
//! against a structural template. Incoherence is an accepted artistic
//! property: the engine guarantees structure and provenance, not sense.

pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod pipeline;
pub mod tagger;

pub use engine::CutupEngine;
pub use models::{FallbackTier, Fragment, LineProvenance, Poem, PoemLine, PosCategory, ShapeKey};
pub use pipeline::classify::{ClassifyConfig, PennTagMapper, TagMapper};
pub use pipeline::corpus::{CorpusError, FragmentStore, MemoryStore, SqliteStore};
pub use pipeline::generate::{CancelToken, GenerateError, LineSpec, Template, TemplateError};
pub use pipeline::ingest::{BatchResult, IngestError, IngestEvent};
pub use tagger::{HeuristicTagger, Sentence, Tagger, TaggerError, Token};
