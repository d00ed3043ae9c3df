use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a shape string contains a category name outside the
/// closed [`PosCategory`] set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown part-of-speech category: {0}")]
pub struct ShapeParseError(pub String);

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }
        }

        impl std::str::FromStr for $name {
            type Err = ShapeParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ShapeParseError(s.into())),
                }
            }
        }
    };
}

str_enum!(PosCategory {
    Noun => "NOUN",
    Verb => "VERB",
    Adj => "ADJ",
    Adv => "ADV",
    Det => "DET",
    Pron => "PRON",
    Prep => "PREP",
    Conj => "CONJ",
    Num => "NUM",
    Part => "PART",
    Intj => "INTJ",
    Punct => "PUNCT",
    Other => "OTHER",
});

impl std::fmt::Display for PosCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered sequence of coarse part-of-speech categories describing a
/// fragment's grammar. Equality is exact sequence equality.
///
/// Canonical text form is the space-joined category names
/// (`"DET NOUN VERB"`), used both in template specs and as the SQLite
/// shape column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeKey(Vec<PosCategory>);

impl ShapeKey {
    pub fn new(categories: Vec<PosCategory>) -> Self {
        Self(categories)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn categories(&self) -> &[PosCategory] {
        &self.0
    }

    /// Parse the canonical space-joined form, e.g. `"DET NOUN VERB"`.
    pub fn parse(s: &str) -> Result<Self, ShapeParseError> {
        s.split_whitespace()
            .map(|c| c.parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl std::fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for cat in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{cat}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<Vec<PosCategory>> for ShapeKey {
    fn from(categories: Vec<PosCategory>) -> Self {
        Self::new(categories)
    }
}
