//! Built-in word-list + suffix tagger.
//!
//! Deliberately best-effort: the generator's output is cut-up poetry, so
//! tagging accuracy trades against having zero model downloads or
//! external processes. Emits Penn-Treebank-style fine tags that the
//! shape mapping collapses to coarse categories.

use regex::Regex;

use super::{Sentence, Tagger, TaggerError, Token};

/// Words that end with '.' without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "prof", "sr", "jr", "vs", "etc", "e.g", "i.e", "cf", "al",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "either", "neither", "another", "such",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "mine",
    "yours", "his", "hers", "ours", "theirs", "myself", "yourself", "himself", "herself",
    "itself", "ourselves", "themselves", "who", "whom", "whose", "what", "which", "something",
    "anything", "nothing", "everything", "someone", "anyone", "everyone", "nobody",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "from", "up", "down", "under",
    "over", "among", "within", "without", "toward", "towards", "upon", "near", "behind",
    "beneath", "beside", "beyond", "across", "along", "around", "despite", "except", "inside",
    "outside", "until", "since", "because", "although", "though", "while", "if", "unless",
    "whereas", "than", "as",
];

const CONJUNCTIONS: &[&str] = &["and", "but", "or", "nor", "so", "yet"];

const MODALS: &[&str] = &[
    "will", "would", "can", "could", "shall", "should", "may", "might", "must",
];

const BE_FORMS: &[&str] = &["is", "am", "are", "was", "were", "be", "been", "being"];

const COMMON_VERBS: &[&str] = &[
    "have", "has", "had", "do", "does", "did", "go", "goes", "went", "gone", "say", "says",
    "said", "get", "gets", "got", "make", "makes", "made", "know", "knows", "knew", "think",
    "thinks", "thought", "take", "takes", "took", "see", "sees", "saw", "seen", "come",
    "comes", "came", "want", "wants", "give", "gives", "gave", "sat", "ran", "stood", "fell",
    "held", "kept", "left", "felt", "put", "let",
];

const INTERJECTIONS: &[&str] = &["oh", "ah", "alas", "hey", "wow", "ouch", "hello", "goodbye"];

const ADVERBS: &[&str] = &[
    "not", "never", "always", "often", "sometimes", "again", "here", "there", "now", "then",
    "soon", "very", "too", "quite", "rather", "almost", "just", "still", "already", "perhaps",
    "maybe", "away", "back", "once", "twice",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ness", "ment", "ity", "ism", "ship", "ance", "ence", "hood", "dom", "ist",
];

const ADJ_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ish", "less", "ic", "ary",
];

pub struct HeuristicTagger {
    token_re: Regex,
}

impl HeuristicTagger {
    pub fn new() -> Self {
        // Words may contain interior apostrophes and hyphens; anything
        // else non-space tokenizes as a single punctuation mark.
        let token_re = Regex::new(r"[A-Za-z0-9]+(?:['\u{2019}-][A-Za-z0-9]+)*|[^\sA-Za-z0-9]")
            .expect("token regex is valid");
        Self { token_re }
    }

    /// Split raw text into sentence substrings with their byte ranges.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let bytes = text.as_bytes();
        let mut start = 0;

        let mut i = 0;
        while i < text.len() {
            let c = bytes[i] as char;
            if matches!(c, '.' | '!' | '?') {
                // Consume trailing terminators and closing quotes
                let mut end = i + 1;
                while end < text.len()
                    && matches!(bytes[end] as char, '.' | '!' | '?' | '"' | '\'' | ')')
                {
                    end += 1;
                }

                if c == '.' && is_abbreviation(&text[start..i]) {
                    i += 1;
                    continue;
                }

                // Only split when followed by whitespace (or end of text)
                if end >= text.len() || (bytes[end] as char).is_whitespace() {
                    let sentence = text[start..end].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence);
                    }
                    start = end;
                }
                i = end;
            } else {
                i += 1;
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }

        sentences
    }

    fn tokenize(&self, sentence: &str) -> Vec<(String, usize, usize)> {
        self.token_re
            .find_iter(sentence)
            .map(|m| (m.as_str().to_string(), m.start(), m.end()))
            .collect()
    }

    fn tag_word(&self, word: &str, sentence_initial: bool) -> String {
        let first = match word.chars().next() {
            Some(c) => c,
            None => return "SYM".to_string(),
        };

        if !first.is_alphanumeric() {
            // Punctuation tokens tag as themselves, Penn style
            return word.to_string();
        }

        if first.is_ascii_digit() {
            return "CD".to_string();
        }

        let lower = word.to_lowercase();
        let lower = lower.as_str();

        if DETERMINERS.contains(&lower) {
            return "DT".to_string();
        }
        if PRONOUNS.contains(&lower) {
            return "PRP".to_string();
        }
        if lower == "to" {
            return "TO".to_string();
        }
        if CONJUNCTIONS.contains(&lower) {
            return "CC".to_string();
        }
        if PREPOSITIONS.contains(&lower) {
            return "IN".to_string();
        }
        if MODALS.contains(&lower) {
            return "MD".to_string();
        }
        if BE_FORMS.contains(&lower) || COMMON_VERBS.contains(&lower) {
            return "VB".to_string();
        }
        if INTERJECTIONS.contains(&lower) {
            return "UH".to_string();
        }
        if ADVERBS.contains(&lower) {
            return "RB".to_string();
        }

        // Capitalized off the sentence start reads as a proper noun
        if !sentence_initial && first.is_uppercase() {
            return "NNP".to_string();
        }

        if lower.ends_with("ly") {
            return "RB".to_string();
        }
        if lower.ends_with("ing") && lower.len() > 4 {
            return "VBG".to_string();
        }
        if lower.ends_with("ed") && lower.len() > 3 {
            return "VBD".to_string();
        }
        if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return "NN".to_string();
        }
        if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return "JJ".to_string();
        }
        if lower.ends_with('s') && !lower.ends_with("ss") && lower.len() > 3 {
            return "NNS".to_string();
        }

        "NN".to_string()
    }
}

fn is_abbreviation(before: &str) -> bool {
    let last_word = before
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("");
    let last_word = last_word.trim_matches(|c: char| !c.is_alphanumeric() && c != '.');
    if last_word.len() == 1 && last_word.chars().all(|c| c.is_alphabetic()) {
        // Single-letter initials: "J. Smith"
        return true;
    }
    ABBREVIATIONS.contains(&last_word.to_lowercase().trim_end_matches('.'))
}

impl Default for HeuristicTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for HeuristicTagger {
    fn tag(&self, raw_text: &str) -> Result<Vec<Sentence>, TaggerError> {
        if raw_text.contains('\0') {
            return Err(TaggerError::MalformedInput(
                "text contains NUL bytes".to_string(),
            ));
        }

        let mut sentences = Vec::new();
        let mut next_token_index = 0;

        for sentence_text in self.split_sentences(raw_text) {
            let raw_tokens = self.tokenize(sentence_text);
            if raw_tokens.is_empty() {
                continue;
            }

            let tokens: Vec<Token> = raw_tokens
                .into_iter()
                .enumerate()
                .map(|(i, (text, start, end))| {
                    let tag = self.tag_word(&text, i == 0);
                    Token { text, tag, start, end }
                })
                .collect();

            let token_count = tokens.len();
            sentences.push(Sentence {
                text: sentence_text.to_string(),
                tokens,
                first_token_index: next_token_index,
            });
            next_token_index += token_count;
        }

        Ok(sentences)
    }
}
