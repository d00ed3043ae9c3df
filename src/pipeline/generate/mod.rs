pub mod generator;
pub mod template;

pub use generator::{generate, CancelToken};
pub use template::{LineSpec, Template, TemplateError};

use thiserror::Error;

use super::corpus::CorpusError;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// The caller cancelled between lines; the in-progress poem is
    /// discarded entirely, never partially returned.
    #[error("Generation cancelled")]
    Cancelled,
}
