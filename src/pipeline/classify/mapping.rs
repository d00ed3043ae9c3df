//! Fine-to-coarse POS mapping.
//!
//! Decouples shape keys from whichever tagger supplies fine-grained
//! tags: the closed [`PosCategory`] set stays stable while taggers come
//! and go. The trait is the granularity seam: a stricter mapper can
//! keep more distinctions without touching the classifier.

use crate::config;
use crate::models::PosCategory;

/// Maps a tagger's fine-grained tag to a coarse category.
pub trait TagMapper: Send + Sync {
    fn coarse(&self, fine_tag: &str) -> PosCategory;

    /// Version stamp persisted on fragments built with this mapper.
    fn version(&self) -> i64;
}

/// Default mapper for Penn-Treebank-style tags. Unknown tags collapse to
/// `OTHER` rather than failing: scraped prose meets unknown taggers.
pub struct PennTagMapper;

impl TagMapper for PennTagMapper {
    fn coarse(&self, fine_tag: &str) -> PosCategory {
        let first = fine_tag.chars().next().unwrap_or(' ');
        if !first.is_ascii_alphanumeric() {
            // Penn tags punctuation as the mark itself (".", ",", ":")
            return PosCategory::Punct;
        }

        match fine_tag {
            "MD" => PosCategory::Verb,
            "DT" | "PDT" | "WDT" => PosCategory::Det,
            "PRP" | "PRP$" | "WP" | "WP$" | "EX" => PosCategory::Pron,
            "IN" => PosCategory::Prep,
            "CC" => PosCategory::Conj,
            "CD" => PosCategory::Num,
            "TO" | "POS" | "RP" => PosCategory::Part,
            "UH" => PosCategory::Intj,
            "SYM" | "LS" | "FW" => PosCategory::Other,
            tag if tag.starts_with("NN") => PosCategory::Noun,
            tag if tag.starts_with("VB") => PosCategory::Verb,
            tag if tag.starts_with("JJ") => PosCategory::Adj,
            tag if tag.starts_with("RB") || tag.starts_with("WRB") => PosCategory::Adv,
            _ => PosCategory::Other,
        }
    }

    fn version(&self) -> i64 {
        config::SHAPE_MAPPING_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noun_family_collapses() {
        let mapper = PennTagMapper;
        for tag in ["NN", "NNS", "NNP", "NNPS"] {
            assert_eq!(mapper.coarse(tag), PosCategory::Noun, "tag {tag}");
        }
    }

    #[test]
    fn verb_family_collapses() {
        let mapper = PennTagMapper;
        for tag in ["VB", "VBD", "VBG", "VBN", "VBP", "VBZ", "MD"] {
            assert_eq!(mapper.coarse(tag), PosCategory::Verb, "tag {tag}");
        }
    }

    #[test]
    fn adjectives_and_adverbs() {
        let mapper = PennTagMapper;
        assert_eq!(mapper.coarse("JJ"), PosCategory::Adj);
        assert_eq!(mapper.coarse("JJR"), PosCategory::Adj);
        assert_eq!(mapper.coarse("RB"), PosCategory::Adv);
        assert_eq!(mapper.coarse("RBS"), PosCategory::Adv);
        assert_eq!(mapper.coarse("WRB"), PosCategory::Adv);
    }

    #[test]
    fn closed_class_words() {
        let mapper = PennTagMapper;
        assert_eq!(mapper.coarse("DT"), PosCategory::Det);
        assert_eq!(mapper.coarse("PRP"), PosCategory::Pron);
        assert_eq!(mapper.coarse("PRP$"), PosCategory::Pron);
        assert_eq!(mapper.coarse("IN"), PosCategory::Prep);
        assert_eq!(mapper.coarse("CC"), PosCategory::Conj);
        assert_eq!(mapper.coarse("CD"), PosCategory::Num);
        assert_eq!(mapper.coarse("TO"), PosCategory::Part);
        assert_eq!(mapper.coarse("UH"), PosCategory::Intj);
    }

    #[test]
    fn punctuation_tags_map_to_punct() {
        let mapper = PennTagMapper;
        for tag in [".", ",", ":", ";", "!", "?", "``", "''", "-"] {
            assert_eq!(mapper.coarse(tag), PosCategory::Punct, "tag {tag}");
        }
    }

    #[test]
    fn unknown_tags_map_to_other() {
        let mapper = PennTagMapper;
        assert_eq!(mapper.coarse("XYZZY"), PosCategory::Other);
        assert_eq!(mapper.coarse(""), PosCategory::Punct);
    }

    #[test]
    fn mapper_reports_current_version() {
        assert_eq!(PennTagMapper.version(), config::SHAPE_MAPPING_VERSION);
    }
}
