use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which fallback tier satisfied a line's query. Tier downgrades trade
/// grammatical fidelity for availability; they are observable here and
/// logged at debug level, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackTier {
    /// Exact shape match within the requested length bounds (or a
    /// wildcard request satisfied within bounds).
    Exact,
    /// Shape ignored; length bounds still respected.
    LengthOnly,
    /// Any remaining fragment, regardless of shape or length.
    Any,
}

impl FallbackTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::LengthOnly => "length_only",
            Self::Any => "any",
        }
    }

    pub fn is_downgrade(&self) -> bool {
        !matches!(self, Self::Exact)
    }
}

/// Where a poem line came from, so an external rendering or audit layer
/// can reconstruct provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineProvenance {
    pub fragment_id: Uuid,
    pub source_doc_id: String,
    pub tier: FallbackTier,
}

/// One rendered poem line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PoemLine {
    Fragment {
        text: String,
        provenance: LineProvenance,
    },
    /// Stanza break from a `{"blank": true}` template entry.
    Blank,
}

impl PoemLine {
    pub fn text(&self) -> &str {
        match self {
            Self::Fragment { text, .. } => text,
            Self::Blank => "",
        }
    }

    pub fn provenance(&self) -> Option<&LineProvenance> {
        match self {
            Self::Fragment { provenance, .. } => Some(provenance),
            Self::Blank => None,
        }
    }
}

/// A generated cut-up poem. Constructed fresh per generation call, never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poem {
    pub lines: Vec<PoemLine>,
    /// Seed the generator ran with; replaying it against an unchanged
    /// corpus reproduces the poem exactly.
    pub seed: u64,
}

impl Poem {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Provenance entries for fragment lines, in line order.
    pub fn provenance(&self) -> impl Iterator<Item = &LineProvenance> {
        self.lines.iter().filter_map(|l| l.provenance())
    }

    /// Count of lines that fell back past an exact shape match.
    pub fn fallback_count(&self) -> usize {
        self.provenance().filter(|p| p.tier.is_downgrade()).count()
    }
}

impl std::fmt::Display for Poem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line.text())?;
        }
        Ok(())
    }
}
