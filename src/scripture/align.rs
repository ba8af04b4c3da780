use tracing::debug;

use super::quotes::Verse;
use crate::config::AlignmentConfig;
use crate::subtitle::Caption;
use crate::text::{coverage, ends_sentence, find_word_sequence, normalize};

/// Caption range holding a verse, as positions in the caption slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentResult {
    pub start_index: usize,
    /// Inclusive
    pub end_index: usize,
    pub coverage: f64,
}

impl AlignmentResult {
    pub fn start_ms(&self, captions: &[Caption]) -> Option<u64> {
        captions.get(self.start_index).map(Caption::start_ms)
    }

    pub fn end_ms(&self, captions: &[Caption]) -> Option<u64> {
        captions.get(self.end_index).map(Caption::end_ms)
    }
}

/// Locates a verse inside a caption track.
///
/// The first anchor words of the verse pin down where the quotation starts;
/// the range then grows caption by caption while word coverage improves.
pub struct Aligner {
    anchor_words: usize,
    anchor_window: usize,
    max_extension: usize,
    patience: usize,
    early_stop_coverage: f64,
    min_coverage: f64,
    lookahead_max_words: usize,
}

impl Aligner {
    pub fn new(config: &AlignmentConfig) -> Self {
        Self {
            anchor_words: config.anchor_words,
            anchor_window: config.anchor_window.max(1),
            max_extension: config.max_extension,
            patience: config.patience,
            early_stop_coverage: config.early_stop_coverage,
            min_coverage: config.min_coverage,
            lookahead_max_words: config.lookahead_max_words,
        }
    }

    pub fn align(&self, verse: &Verse, captions: &[Caption]) -> Option<AlignmentResult> {
        let verse_words = verse.words();
        if verse_words.is_empty() || captions.is_empty() {
            return None;
        }

        let normalized: Vec<String> = captions.iter().map(|c| normalize(&c.text)).collect();
        let anchor = &verse_words[..verse_words.len().min(self.anchor_words)];

        let start = self.find_anchor(&normalized, anchor)?;
        let (mut end, best) = self.extend(verse, &normalized, start);

        if let Some(next) = normalized.get(end + 1) {
            let next_words = next.split_whitespace().count();
            if ends_sentence(&captions[end + 1].text)
                && next_words <= self.lookahead_max_words
                && next.chars().count() > 3
            {
                debug!("Including closing caption '{}'", captions[end + 1].text);
                end += 1;
            }
        }

        if best < self.min_coverage {
            debug!(
                "Best coverage {:.0}% below {:.0}% for '{}'",
                best * 100.0,
                self.min_coverage * 100.0,
                verse.preview(40)
            );
            return None;
        }

        Some(AlignmentResult {
            start_index: start,
            end_index: end,
            coverage: best,
        })
    }

    /// Caption holding the first anchor word, taken from the earliest window
    /// whose joined text contains the whole anchor in order
    fn find_anchor(&self, normalized: &[String], anchor: &[&str]) -> Option<usize> {
        for i in 0..normalized.len() {
            let window_end = (i + self.anchor_window).min(normalized.len());
            let mut owners = Vec::new();
            let mut words = Vec::new();

            for (offset, text) in normalized[i..window_end].iter().enumerate() {
                for word in text.split_whitespace() {
                    words.push(word);
                    owners.push(i + offset);
                }
            }

            if let Some(position) = find_word_sequence(&words, anchor) {
                return Some(owners[position]);
            }
        }
        None
    }

    /// Best end index and its coverage
    fn extend(&self, verse: &Verse, normalized: &[String], start: usize) -> (usize, f64) {
        let limit = (start + self.max_extension).min(normalized.len());
        let mut best_end = start;
        let mut best = 0.0;
        let mut stale = 0;

        for end in start..limit {
            let joined = normalized[start..=end].join(" ");
            let current = coverage(&verse.word_set, &joined);

            if current > best {
                best = current;
                best_end = end;
                stale = 0;
            } else {
                stale += 1;
                if stale >= self.patience && best > self.early_stop_coverage {
                    break;
                }
            }
        }

        (best_end, best)
    }
}
