use serde::Deserialize;
use thiserror::Error;

use crate::models::{ShapeKey, ShapeParseError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Invalid line bounds: min {min} must satisfy 1 <= min <= max ({max})")]
    InvalidBounds { min: usize, max: usize },

    #[error("{0}")]
    UnknownCategory(#[from] ShapeParseError),

    #[error("Malformed template spec: {0}")]
    Malformed(String),

    #[error("Template has no lines")]
    Empty,
}

/// Constraint for one poem line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSpec {
    Fragment {
        /// `None` is the wildcard: any shape, only length constrained.
        shape: Option<ShapeKey>,
        min_len: usize,
        max_len: usize,
    },
    /// Stanza break. Consumes no fragment and no RNG draw.
    Blank,
}

/// Ordered per-line constraints defining a poem's structure. Immutable
/// once parsed; reusable across arbitrarily many generation calls and
/// across concurrent callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    lines: Vec<LineSpec>,
}

/// One entry of the JSON template array.
#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(default)]
    shape: Option<String>,
    #[serde(default)]
    min: Option<usize>,
    #[serde(default)]
    max: Option<usize>,
    #[serde(default)]
    blank: bool,
}

impl Template {
    /// Parse a JSON template spec, e.g.
    ///
    /// ```json
    /// [
    ///   {"shape": "DET NOUN VERB", "min": 3, "max": 3},
    ///   {"blank": true},
    ///   {"shape": "*", "min": 2, "max": 6}
    /// ]
    /// ```
    ///
    /// All validation happens here, before any index access.
    pub fn parse(spec: &str) -> Result<Self, TemplateError> {
        let raw: Vec<RawLine> =
            serde_json::from_str(spec).map_err(|e| TemplateError::Malformed(e.to_string()))?;

        let mut lines = Vec::with_capacity(raw.len());
        for (i, entry) in raw.into_iter().enumerate() {
            if entry.blank {
                if entry.shape.is_some() || entry.min.is_some() || entry.max.is_some() {
                    return Err(TemplateError::Malformed(format!(
                        "line {i}: blank lines take no shape or bounds"
                    )));
                }
                lines.push(LineSpec::Blank);
                continue;
            }

            let shape_str = entry.shape.ok_or_else(|| {
                TemplateError::Malformed(format!("line {i}: missing \"shape\""))
            })?;
            let min_len = entry
                .min
                .ok_or_else(|| TemplateError::Malformed(format!("line {i}: missing \"min\"")))?;
            let max_len = entry
                .max
                .ok_or_else(|| TemplateError::Malformed(format!("line {i}: missing \"max\"")))?;

            let shape = if shape_str.trim() == "*" {
                None
            } else {
                let parsed = ShapeKey::parse(&shape_str)?;
                if parsed.is_empty() {
                    return Err(TemplateError::Malformed(format!(
                        "line {i}: empty shape (use \"*\" for a wildcard)"
                    )));
                }
                Some(parsed)
            };

            lines.push(LineSpec::fragment(shape, min_len, max_len)?);
        }

        Self::from_lines(lines)
    }

    /// Build a template programmatically. Applies the same validation as
    /// [`Template::parse`].
    pub fn from_lines(lines: Vec<LineSpec>) -> Result<Self, TemplateError> {
        if lines.is_empty() {
            return Err(TemplateError::Empty);
        }
        for line in &lines {
            if let LineSpec::Fragment {
                min_len, max_len, ..
            } = line
            {
                check_bounds(*min_len, *max_len)?;
            }
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[LineSpec] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LineSpec {
    /// Validated fragment line constructor.
    pub fn fragment(
        shape: Option<ShapeKey>,
        min_len: usize,
        max_len: usize,
    ) -> Result<Self, TemplateError> {
        check_bounds(min_len, max_len)?;
        Ok(Self::Fragment {
            shape,
            min_len,
            max_len,
        })
    }
}

fn check_bounds(min_len: usize, max_len: usize) -> Result<(), TemplateError> {
    if min_len < 1 || min_len > max_len {
        return Err(TemplateError::InvalidBounds {
            min: min_len,
            max: max_len,
        });
    }
    Ok(())
}
