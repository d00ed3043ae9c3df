pub mod mapping;
pub mod spans;

pub use mapping::{PennTagMapper, TagMapper};
pub use spans::{classify, ClassifyConfig};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Invalid fragment span range: min {min} must satisfy 1 <= min <= max ({max})")]
    InvalidRange { min: usize, max: usize },
}
