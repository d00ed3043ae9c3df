pub mod heuristic;

pub use heuristic::HeuristicTagger;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// One token of a tagged sentence. `start`/`end` are byte offsets into
/// the owning sentence's text, so fragment surfaces can be cut as exact
/// slices with spacing and punctuation intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Fine-grained POS tag (Penn-Treebank-style for the built-in tagger).
    pub tag: String,
    pub start: usize,
    pub end: usize,
}

/// An ordered sequence of tagged tokens cut from one sentence.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
    /// Index of this sentence's first token counted from the start of
    /// the document. Keeps fragment token offsets document-global so
    /// identical spans from different sentences never collide on
    /// `(text, source_doc_id, token_offset)`.
    pub first_token_index: usize,
}

impl Sentence {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Splits raw text into sentences of (token, fine POS tag) pairs.
///
/// The core treats implementations as black boxes with no internal state
/// to reproduce; [`HeuristicTagger`] is the built-in one, and callers may
/// inject their own (e.g. a bridge to an external NLP tagger).
pub trait Tagger: Send + Sync {
    fn tag(&self, raw_text: &str) -> Result<Vec<Sentence>, TaggerError>;
}

/// Allow `Box<dyn Tagger>` wherever `&impl Tagger` is expected.
impl Tagger for Box<dyn Tagger> {
    fn tag(&self, raw_text: &str) -> Result<Vec<Sentence>, TaggerError> {
        (**self).tag(raw_text)
    }
}
