//! Text normalization and the comparison helpers built on it.
//!
//! Every comparison between recognizer output and source text goes through
//! [`normalize`] first, so casing, punctuation and spacing never decide a match.

use std::collections::HashSet;

/// Characters removed before comparing two texts
const STRIPPED: &[char] = &[
    '«', '»', '"', '\'', '.', ',', ';', ':', '!', '?', '-', '—', '–',
];

/// Lowercase, drop punctuation and quotes, collapse whitespace.
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Distinct words of an already normalized text
pub fn word_set(normalized: &str) -> HashSet<String> {
    normalized.split_whitespace().map(str::to_string).collect()
}

/// Fraction of `reference` words present in `text` once normalized.
///
/// An empty reference covers nothing.
pub fn coverage(reference: &HashSet<String>, text: &str) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    let normalized = normalize(text);
    let found = normalized
        .split_whitespace()
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|word| reference.contains(*word))
        .count();
    found as f64 / reference.len() as f64
}

/// Symmetric similarity ratio in [0, 1] between two normalized texts
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Word offset of the first occurrence of `needle` in `words`
pub fn find_word_sequence(words: &[&str], needle: &[&str]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    words.windows(needle.len()).position(|window| window == needle)
}

/// Whether a caption or word closes a sentence or clause
pub fn ends_clause(text: &str) -> bool {
    text.trim_end().ends_with(['.', '!', '?', ';', ':'])
}

/// Whether a caption closes a sentence
pub fn ends_sentence(text: &str) -> bool {
    text.trim_end().ends_with(['.', '!', '?'])
}
