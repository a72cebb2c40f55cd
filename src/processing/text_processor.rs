//! Text normalization and tokenization

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    whitespace_regex: Regex,
    min_token_len: usize,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"[ \t\u{00A0}]+").expect("Invalid whitespace regex");

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            whitespace_regex,
            min_token_len: 2,
        }
    }

    /// Fold typographic punctuation to ASCII, unify line endings and collapse
    /// runs of horizontal whitespace. Line structure is preserved.
    pub fn normalize(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");
        let folded = Self::normalize_unicode(&unified);
        self.whitespace_regex.replace_all(&folded, " ").into_owned()
    }

    /// Lower-cased word tokens with stop words and one-character tokens
    /// removed. Tokens must contain at least one letter.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|word| word.chars().count() >= self.min_token_len)
            .filter(|word| word.chars().any(char::is_alphabetic))
            .filter(|word| !self.stop_words.contains(word.as_str()))
            .collect()
    }

    /// Raw term counts, ordered by term so downstream sums are deterministic.
    pub fn term_frequencies(&self, text: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for token in self.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    fn normalize_unicode(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{2022}' | '\u{25CF}' | '\u{25AA}' => '-', // bullets
                '\u{2026}' => '.',
                _ => c,
            })
            .collect()
    }
}

/// Common English function words.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before", "being",
    "below", "between", "both", "but", "by", "can", "could", "did", "do", "does",
    "doing", "down", "during", "each", "either", "etc", "ever", "every", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "itself", "just", "may", "me", "might", "more",
    "most", "must", "my", "myself", "neither", "no", "nor", "not", "now", "of",
    "off", "often", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "per", "same", "shall", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through",
    "thus", "to", "too", "under", "until", "up", "upon", "us", "very", "via",
    "was", "we", "were", "what", "when", "where", "whether", "which", "while",
    "who", "whom", "whose", "why", "will", "with", "within", "without", "would",
    "yet", "you", "your", "yours", "yourself", "yourselves",
];
