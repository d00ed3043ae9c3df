use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use super::template::{LineSpec, Template};
use super::GenerateError;
use crate::pipeline::corpus::{self, FragmentStore};
use crate::models::{LineProvenance, Poem, PoemLine};

/// Cooperative cancellation flag checked between lines. Clones share the
/// flag, so a caller can hold one half and hand the other to the
/// generation call.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Assemble a poem by walking the template in line order.
///
/// Lines are produced sequentially because each query excludes every
/// fragment already chosen in this call; no line's content depends on a
/// later line's outcome. With a fixed seed, template and corpus content,
/// the result is byte-identical across calls. Holds no state across
/// calls.
///
/// Any failure (or cancellation between lines) aborts the whole call;
/// callers never receive a partially filled poem.
pub fn generate(
    template: &Template,
    store: &dyn FragmentStore,
    seed: u64,
    cancel: Option<&CancelToken>,
) -> Result<Poem, GenerateError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut exclude: HashSet<Uuid> = HashSet::new();
    let mut lines = Vec::with_capacity(template.len());

    for (line_no, spec) in template.lines().iter().enumerate() {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                tracing::info!(line_no, "Generation cancelled, discarding partial poem");
                return Err(GenerateError::Cancelled);
            }
        }

        match spec {
            LineSpec::Blank => lines.push(PoemLine::Blank),
            LineSpec::Fragment {
                shape,
                min_len,
                max_len,
            } => {
                let (fragment, tier) = corpus::query(
                    store,
                    shape.as_ref(),
                    *min_len,
                    *max_len,
                    &exclude,
                    &mut rng,
                )?;

                if tier.is_downgrade() {
                    tracing::debug!(
                        line_no,
                        tier = tier.as_str(),
                        requested_shape = %shape.as_ref().map(|s| s.to_string()).unwrap_or_else(|| "*".into()),
                        "Fallback tier used for line"
                    );
                }

                exclude.insert(fragment.id);
                lines.push(PoemLine::Fragment {
                    provenance: LineProvenance {
                        fragment_id: fragment.id,
                        source_doc_id: fragment.source_doc_id,
                        tier,
                    },
                    text: fragment.text,
                });
            }
        }
    }

    tracing::info!(
        lines = lines.len(),
        seed,
        "Generated poem"
    );

    Ok(Poem { lines, seed })
}
