use tracing::debug;

use crate::config::SegmentationConfig;
use crate::subtitle::Caption;
use crate::text::ends_clause;
use crate::transcript::{Segment, Word};
use super::compound::{count_linguistic_words, merge_compound_words};

/// Splits recognizer segments into short captions.
///
/// Segments already within the word, character and duration limits pass
/// through. Longer ones are cut on word timestamps when the recognizer gave
/// them, otherwise on whitespace with proportionally interpolated timings.
/// No word is ever dropped.
pub struct Segmenter {
    max_words: usize,
    max_chars: usize,
    max_duration: f64,
}

impl Segmenter {
    pub fn new(config: &SegmentationConfig) -> Self {
        Self {
            max_words: config.max_words,
            max_chars: config.max_chars,
            max_duration: config.max_duration,
        }
    }

    /// Captions are numbered from 1 in output order
    pub fn segment(&self, segments: &[Segment]) -> Vec<Caption> {
        let mut captions = Vec::new();

        for segment in segments {
            let text = segment.text.trim();
            let word_count = if segment.has_words() {
                count_linguistic_words(&segment.words)
            } else {
                text.split_whitespace().count()
            };

            if word_count <= self.max_words
                && text.chars().count() <= self.max_chars
                && segment.duration() <= self.max_duration
            {
                captions.push(Caption::new(0, segment.start, segment.end, text));
                continue;
            }

            debug!(
                "Resegmenting '{}' ({} linguistic words, {:.2}s)",
                text.chars().take(30).collect::<String>(),
                word_count,
                segment.duration()
            );

            if segment.has_words() {
                captions.extend(self.split_on_words(&segment.words));
            } else {
                captions.extend(self.split_on_text(text, segment.start, segment.end));
            }
        }

        for (i, caption) in captions.iter_mut().enumerate() {
            caption.index = i + 1;
        }
        captions
    }

    fn split_on_words(&self, words: &[Word]) -> Vec<Caption> {
        let merged = merge_compound_words(words);
        let mut captions = Vec::new();
        let mut buffer: Vec<&Word> = Vec::new();

        for (i, word) in merged.iter().enumerate() {
            buffer.push(word);

            // Recognizer tokens carry their own leading spaces
            let buffered_text: String = buffer.iter().map(|w| w.text.as_str()).collect();
            let buffered_text = buffered_text.trim();

            let flush = buffer.len() >= self.max_words
                || buffered_text.chars().count() >= self.max_chars
                || i == merged.len() - 1
                || ends_clause(&word.text);

            if flush && !buffered_text.is_empty() {
                let start = buffer[0].start;
                let end = buffer[buffer.len() - 1].end;
                captions.push(Caption::new(0, start, end, buffered_text));
                buffer.clear();
            }
        }

        captions
    }

    fn split_on_text(&self, text: &str, start: f64, end: f64) -> Vec<Caption> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let total = words.len();
        let duration = end - start;
        let mut captions = Vec::new();
        let mut consumed = 0;

        while consumed < total {
            let chunk_start = consumed;
            let mut chunk_chars = 0;

            while consumed < total && consumed - chunk_start < self.max_words {
                let word_chars = words[consumed].chars().count();
                let separator = if consumed > chunk_start { 1 } else { 0 };
                if chunk_chars + separator + word_chars > self.max_chars {
                    break;
                }
                chunk_chars += separator + word_chars;
                consumed += 1;
            }

            // A single word longer than the limit still gets its own caption
            if consumed == chunk_start {
                consumed += 1;
            }

            let caption_start = start + duration * (chunk_start as f64 / total as f64);
            let caption_end = start + duration * (consumed as f64 / total as f64);
            captions.push(Caption::new(0, caption_start, caption_end, words[chunk_start..consumed].join(" ")));
        }

        captions
    }
}
