use super::mapping::TagMapper;
use super::ClassifyError;
use crate::config;
use crate::models::{Fragment, ShapeKey};
use crate::tagger::Sentence;

/// Span range for fragment candidates, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyConfig {
    min_frag: usize,
    max_frag: usize,
}

impl ClassifyConfig {
    pub fn new(min_frag: usize, max_frag: usize) -> Result<Self, ClassifyError> {
        if min_frag < 1 || min_frag > max_frag {
            return Err(ClassifyError::InvalidRange {
                min: min_frag,
                max: max_frag,
            });
        }
        Ok(Self { min_frag, max_frag })
    }

    pub fn min_frag(&self) -> usize {
        self.min_frag
    }

    pub fn max_frag(&self) -> usize {
        self.max_frag
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            min_frag: config::DEFAULT_MIN_FRAG,
            max_frag: config::DEFAULT_MAX_FRAG,
        }
    }
}

/// Produce one fragment per contiguous token span of the sentence with
/// length inside the configured range. Deterministic pure function of
/// its input: surfaces are exact byte slices of the sentence text, shape
/// keys the coarse-mapped tag sequence of the span.
///
/// Spans never extend past the sentence boundary, which bounds the
/// candidate count at O(token_count × (max_frag − min_frag + 1)).
pub fn classify(
    sentence: &Sentence,
    mapper: &dyn TagMapper,
    cfg: &ClassifyConfig,
    source_doc_id: &str,
) -> Vec<Fragment> {
    let n = sentence.tokens.len();
    let mut fragments = Vec::new();

    let coarse: Vec<_> = sentence
        .tokens
        .iter()
        .map(|t| mapper.coarse(&t.tag))
        .collect();

    for start in 0..n {
        let longest = cfg.max_frag.min(n - start);
        for len in cfg.min_frag..=longest {
            let first = &sentence.tokens[start];
            let last = &sentence.tokens[start + len - 1];
            let text = sentence.text[first.start..last.end].to_string();
            let shape = ShapeKey::new(coarse[start..start + len].to_vec());

            fragments.push(Fragment::new(
                text,
                shape,
                source_doc_id.to_string(),
                sentence.first_token_index + start,
            ));
        }
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::mapping::PennTagMapper;
    use crate::tagger::Token;

    fn make_sentence(text: &str, tags: &[&str]) -> Sentence {
        // Tokens are the whitespace-split words of `text`, offsets computed
        let mut tokens = Vec::new();
        let mut cursor = 0;
        for (word, tag) in text.split_whitespace().zip(tags) {
            let start = text[cursor..].find(word).unwrap() + cursor;
            let end = start + word.len();
            tokens.push(Token {
                text: word.to_string(),
                tag: tag.to_string(),
                start,
                end,
            });
            cursor = end;
        }
        assert_eq!(tokens.len(), tags.len(), "tag count must match words");
        Sentence {
            text: text.to_string(),
            tokens,
            first_token_index: 0,
        }
    }

    #[test]
    fn spans_stay_inside_sentence_bounds() {
        // "The cat sat": 3 tokens, range [1, 3]
        let sentence = make_sentence("The cat sat", &["DT", "NN", "VB"]);
        let cfg = ClassifyConfig::new(1, 3).unwrap();
        let fragments = classify(&sentence, &PennTagMapper, &cfg, "doc-1");

        // 3 of len 1, 2 of len 2, 1 of len 3
        assert_eq!(fragments.len(), 6);
        assert!(fragments.iter().all(|f| f.token_length <= 3));
        assert!(fragments
            .iter()
            .all(|f| f.token_offset + f.token_length <= 3));
    }

    #[test]
    fn oversized_max_does_not_overrun() {
        let sentence = make_sentence("The cat sat", &["DT", "NN", "VB"]);
        let cfg = ClassifyConfig::new(1, 10).unwrap();
        let fragments = classify(&sentence, &PennTagMapper, &cfg, "doc-1");
        assert_eq!(fragments.len(), 6);
        assert!(fragments.iter().all(|f| f.token_length <= 3));
    }

    #[test]
    fn shape_length_equals_token_length() {
        let sentence = make_sentence("The quick brown fox jumped", &["DT", "JJ", "JJ", "NN", "VBD"]);
        let cfg = ClassifyConfig::new(1, 4).unwrap();
        for fragment in classify(&sentence, &PennTagMapper, &cfg, "doc-1") {
            assert_eq!(fragment.shape.len(), fragment.token_length);
        }
    }

    #[test]
    fn surface_preserves_original_spacing() {
        let sentence = make_sentence("The  cat sat", &["DT", "NN", "VB"]);
        let cfg = ClassifyConfig::new(3, 3).unwrap();
        let fragments = classify(&sentence, &PennTagMapper, &cfg, "doc-1");
        assert_eq!(fragments.len(), 1);
        // Double space survives because the surface is a byte slice
        assert_eq!(fragments[0].text, "The  cat sat");
    }

    #[test]
    fn shapes_are_coarse_mapped() {
        let sentence = make_sentence("The cat sat", &["DT", "NN", "VB"]);
        let cfg = ClassifyConfig::new(3, 3).unwrap();
        let fragments = classify(&sentence, &PennTagMapper, &cfg, "doc-1");
        assert_eq!(fragments[0].shape.to_string(), "DET NOUN VERB");
    }

    #[test]
    fn min_frag_filters_short_spans() {
        let sentence = make_sentence("The cat sat", &["DT", "NN", "VB"]);
        let cfg = ClassifyConfig::new(2, 3).unwrap();
        let fragments = classify(&sentence, &PennTagMapper, &cfg, "doc-1");
        // 2 of len 2, 1 of len 3
        assert_eq!(fragments.len(), 3);
        assert!(fragments.iter().all(|f| f.token_length >= 2));
    }

    #[test]
    fn token_offsets_respect_sentence_position() {
        let mut sentence = make_sentence("cat sat", &["NN", "VB"]);
        sentence.first_token_index = 10;
        let cfg = ClassifyConfig::new(1, 1).unwrap();
        let fragments = classify(&sentence, &PennTagMapper, &cfg, "doc-1");
        let offsets: Vec<usize> = fragments.iter().map(|f| f.token_offset).collect();
        assert_eq!(offsets, vec![10, 11]);
    }

    #[test]
    fn sentence_shorter_than_min_yields_nothing() {
        let sentence = make_sentence("cat", &["NN"]);
        let cfg = ClassifyConfig::new(2, 4).unwrap();
        assert!(classify(&sentence, &PennTagMapper, &cfg, "doc-1").is_empty());
    }

    #[test]
    fn config_rejects_inverted_range() {
        let err = ClassifyConfig::new(5, 3).unwrap_err();
        assert_eq!(err, ClassifyError::InvalidRange { min: 5, max: 3 });
    }

    #[test]
    fn config_rejects_zero_min() {
        assert!(ClassifyConfig::new(0, 3).is_err());
    }
}
