pub mod fragment;
pub mod poem;
pub mod shape;

pub use fragment::Fragment;
pub use poem::{FallbackTier, LineProvenance, Poem, PoemLine};
pub use shape::{PosCategory, ShapeKey, ShapeParseError};
