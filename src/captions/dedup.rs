use tracing::debug;

use crate::config::DedupConfig;
use crate::text::{normalize, similarity};
use crate::transcript::Segment;

/// Collapses recognizer repetition artifacts.
///
/// A run of consecutive segments whose text stays close to the run's first
/// segment is replaced by that first segment stretched over the whole run.
/// Short runs are normal speech and stay untouched.
pub struct Deduplicator {
    similarity_threshold: f64,
    min_run: usize,
    min_text_chars: usize,
}

impl Deduplicator {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            min_run: config.min_run,
            min_text_chars: config.min_text_chars,
        }
    }

    pub fn dedupe(&self, segments: Vec<Segment>) -> Vec<Segment> {
        let mut clean = Vec::with_capacity(segments.len());
        let mut i = 0;

        while i < segments.len() {
            let anchor = &segments[i];
            let anchor_text = anchor.text.trim();

            if anchor_text.chars().count() < self.min_text_chars {
                i += 1;
                continue;
            }

            let anchor_normalized = normalize(anchor_text);
            let mut j = i + 1;
            while j < segments.len() {
                let ratio = similarity(&anchor_normalized, &normalize(&segments[j].text));
                if ratio > self.similarity_threshold {
                    j += 1;
                } else {
                    break;
                }
            }

            let run_length = j - i;
            if run_length >= self.min_run {
                debug!(
                    "Repetition collapsed ({} times): '{}'",
                    run_length,
                    anchor_text.chars().take(40).collect::<String>()
                );
                clean.push(Segment {
                    start: anchor.start,
                    end: segments[j - 1].end,
                    text: anchor_text.to_string(),
                    words: anchor.words.clone(),
                });
                i = j;
            } else {
                clean.push(anchor.clone());
                i += 1;
            }
        }

        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dedupe(segments: Vec<Segment>) -> Vec<Segment> {
        Deduplicator::new(&DedupConfig::default()).dedupe(segments)
    }

    #[test]
    fn test_four_similar_segments_collapse_to_one() {
        let segments = vec![
            Segment::new(0.0, 1.0, "Merci Seigneur Jésus."),
            Segment::new(1.0, 2.0, "Merci Seigneur Jésus"),
            Segment::new(2.0, 3.0, "merci seigneur jésus !"),
            Segment::new(3.0, 4.5, "Merci, Seigneur Jésus."),
        ];

        let out = dedupe(segments);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start, 0.0);
        assert_eq!(out[0].end, 4.5);
        assert_eq!(out[0].text, "Merci Seigneur Jésus.");
    }

    #[test]
    fn test_two_similar_segments_are_kept() {
        let segments = vec![
            Segment::new(0.0, 1.0, "Alléluia, alléluia"),
            Segment::new(1.0, 2.0, "Alléluia alléluia"),
            Segment::new(2.0, 3.0, "Ouvrons nos bibles"),
        ];

        let out = dedupe(segments.clone());
        assert_eq!(out, segments);
    }

    #[test]
    fn test_short_segments_are_dropped() {
        let segments = vec![
            Segment::new(0.0, 0.2, " Ah"),
            Segment::new(0.2, 2.0, "Que Dieu vous bénisse"),
        ];
        let out = dedupe(segments);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Que Dieu vous bénisse");
    }

    #[test]
    fn test_run_stops_at_first_dissimilar_segment() {
        let segments = vec![
            Segment::new(0.0, 1.0, "Sous-titres réalisés par la communauté"),
            Segment::new(1.0, 2.0, "Sous-titres réalisés par la communauté"),
            Segment::new(2.0, 3.0, "Sous-titres réalisés par la communauté"),
            Segment::new(3.0, 4.0, "Le Seigneur est mon berger"),
            Segment::new(4.0, 5.0, "Sous-titres réalisés par la communauté"),
        ];
        let out = dedupe(segments);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].end, 3.0);
        assert_eq!(out[1].text, "Le Seigneur est mon berger");
    }
}
