use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use uuid::Uuid;

use super::types::FragmentStore;
use super::CorpusError;
use crate::models::{FallbackTier, Fragment, ShapeKey};

/// Resolve one constrained random pick from the store.
///
/// Three-tier fallback, each tier excluding `exclude` ids:
///   1. exact shape match with length in `[min_len, max_len]`;
///   2. any fragment with length in bounds, shape ignored;
///   3. any remaining fragment regardless of length.
/// Only when no fragment survives the exclusions at all does the query
/// fail, with [`CorpusError::EmptyIndex`]: generation trades
/// grammatical fidelity for availability rather than blocking.
///
/// A `None` shape is a wildcard: the length-bounded pick already
/// satisfies the request, so it reports [`FallbackTier::Exact`].
///
/// Candidates are ordered by `(source_doc_id, token_offset, text)`
/// before the seeded pick, so equal corpus content reproduces equal
/// poems regardless of store backend or insertion interleaving.
pub fn query(
    store: &dyn FragmentStore,
    shape: Option<&ShapeKey>,
    min_len: usize,
    max_len: usize,
    exclude: &HashSet<Uuid>,
    rng: &mut StdRng,
) -> Result<(Fragment, FallbackTier), CorpusError> {
    if let Some(shape) = shape {
        let mut candidates = store.by_shape(shape)?;
        candidates.retain(|f| {
            f.token_length >= min_len && f.token_length <= max_len && !exclude.contains(&f.id)
        });
        if let Some(fragment) = pick(candidates, rng) {
            return Ok((fragment, FallbackTier::Exact));
        }
    }

    let mut in_bounds = Vec::new();
    for len in min_len..=max_len {
        in_bounds.extend(store.by_length(len)?);
    }
    in_bounds.retain(|f| !exclude.contains(&f.id));
    if let Some(fragment) = pick(in_bounds, rng) {
        let tier = if shape.is_none() {
            FallbackTier::Exact
        } else {
            FallbackTier::LengthOnly
        };
        return Ok((fragment, tier));
    }

    let mut remaining = store.all()?;
    remaining.retain(|f| !exclude.contains(&f.id));
    if let Some(fragment) = pick(remaining, rng) {
        return Ok((fragment, FallbackTier::Any));
    }

    Err(CorpusError::EmptyIndex)
}

fn pick(mut candidates: Vec<Fragment>, rng: &mut StdRng) -> Option<Fragment> {
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| {
        (&a.source_doc_id, a.token_offset, &a.text).cmp(&(&b.source_doc_id, b.token_offset, &b.text))
    });
    let index = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::corpus::MemoryStore;
    use rand::SeedableRng;

    fn make_fragment(text: &str, shape: &str, doc: &str, offset: usize) -> Fragment {
        Fragment::new(
            text.into(),
            ShapeKey::parse(shape).unwrap(),
            doc.into(),
            offset,
        )
    }

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn tier_one_prefers_exact_shape() {
        let store = MemoryStore::new();
        store
            .insert(make_fragment("the cat", "DET NOUN", "doc-1", 0))
            .unwrap();
        store
            .insert(make_fragment("ran far", "VERB ADV", "doc-1", 2))
            .unwrap();

        let shape = ShapeKey::parse("DET NOUN").unwrap();
        let (fragment, tier) = query(
            &store,
            Some(&shape),
            1,
            5,
            &HashSet::new(),
            &mut seeded(),
        )
        .unwrap();
        assert_eq!(fragment.text, "the cat");
        assert_eq!(tier, FallbackTier::Exact);
    }

    #[test]
    fn tier_two_when_shape_missing() {
        let store = MemoryStore::new();
        store
            .insert(make_fragment("ran far", "VERB ADV", "doc-1", 2))
            .unwrap();

        let shape = ShapeKey::parse("DET NOUN").unwrap();
        let (fragment, tier) = query(
            &store,
            Some(&shape),
            2,
            2,
            &HashSet::new(),
            &mut seeded(),
        )
        .unwrap();
        assert_eq!(fragment.text, "ran far");
        assert_eq!(tier, FallbackTier::LengthOnly);
    }

    #[test]
    fn tier_three_when_length_missing() {
        // Index holds only NOUN VERB length-2 fragments; the request wants
        // VERB NOUN NOUN at length 3. Tier 1 and 2 both miss, tier 3 still
        // returns a usable line.
        let store = MemoryStore::new();
        store
            .insert(make_fragment("cat sat", "NOUN VERB", "doc-1", 0))
            .unwrap();

        let shape = ShapeKey::parse("VERB NOUN NOUN").unwrap();
        let (fragment, tier) = query(
            &store,
            Some(&shape),
            3,
            3,
            &HashSet::new(),
            &mut seeded(),
        )
        .unwrap();
        assert_eq!(fragment.text, "cat sat");
        assert_eq!(tier, FallbackTier::Any);
    }

    #[test]
    fn empty_store_fails_with_empty_index() {
        let store = MemoryStore::new();
        let shape = ShapeKey::parse("NOUN").unwrap();
        let result = query(
            &store,
            Some(&shape),
            1,
            3,
            &HashSet::new(),
            &mut seeded(),
        );
        assert!(matches!(result, Err(CorpusError::EmptyIndex)));
    }

    #[test]
    fn exclusions_can_exhaust_the_index() {
        let store = MemoryStore::new();
        let fragment = make_fragment("cat", "NOUN", "doc-1", 0);
        let id = fragment.id;
        store.insert(fragment).unwrap();

        let exclude: HashSet<Uuid> = [id].into();
        let shape = ShapeKey::parse("NOUN").unwrap();
        let result = query(&store, Some(&shape), 1, 3, &exclude, &mut seeded());
        assert!(matches!(result, Err(CorpusError::EmptyIndex)));
    }

    #[test]
    fn exclusions_push_into_fallback() {
        let store = MemoryStore::new();
        let exact = make_fragment("cat", "NOUN", "doc-1", 0);
        let excluded_id = exact.id;
        store.insert(exact).unwrap();
        store
            .insert(make_fragment("ran far", "VERB ADV", "doc-1", 1))
            .unwrap();

        let exclude: HashSet<Uuid> = [excluded_id].into();
        let shape = ShapeKey::parse("NOUN").unwrap();
        let (fragment, tier) =
            query(&store, Some(&shape), 1, 1, &exclude, &mut seeded()).unwrap();
        assert_eq!(fragment.text, "ran far");
        assert_eq!(tier, FallbackTier::Any);
    }

    #[test]
    fn wildcard_reports_exact_tier() {
        let store = MemoryStore::new();
        store
            .insert(make_fragment("the cat", "DET NOUN", "doc-1", 0))
            .unwrap();

        let (fragment, tier) =
            query(&store, None, 1, 5, &HashSet::new(), &mut seeded()).unwrap();
        assert_eq!(fragment.text, "the cat");
        assert_eq!(tier, FallbackTier::Exact);
    }

    #[test]
    fn same_seed_picks_same_fragment() {
        let store = MemoryStore::new();
        for i in 0..20 {
            store
                .insert(make_fragment(&format!("word{i}"), "NOUN", "doc-1", i))
                .unwrap();
        }

        let shape = ShapeKey::parse("NOUN").unwrap();
        let (a, _) = query(
            &store,
            Some(&shape),
            1,
            1,
            &HashSet::new(),
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap();
        let (b, _) = query(
            &store,
            Some(&shape),
            1,
            1,
            &HashSet::new(),
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap();
        assert_eq!(a.id, b.id);
    }
}
