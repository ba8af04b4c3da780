//! Caption track construction from recognizer segments.
//!
//! Stages run in a fixed order: repetition collapse, resegmentation into
//! short captions, gap filling, then overlap resolution. Each stage takes
//! and returns an owned list.

pub mod compound;
pub mod dedup;
pub mod segment;
pub mod timing;

use tracing::info;

use crate::config::Config;
use crate::subtitle::{renumber, Caption};
use crate::transcript::Segment;

pub use compound::{count_linguistic_words, merge_compound_words};
pub use dedup::Deduplicator;
pub use segment::Segmenter;
pub use timing::{fill_gaps, resolve_overlaps};

/// Runs every caption stage with one configuration
pub struct CaptionPipeline {
    config: Config,
}

impl CaptionPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn run(&self, segments: Vec<Segment>) -> Vec<Caption> {
        let input_count = segments.len();

        let segments = Deduplicator::new(&self.config.dedup).dedupe(segments);
        info!("Deduplication: {} -> {} segments", input_count, segments.len());

        let captions = Segmenter::new(&self.config.segmentation).segment(&segments);
        info!("Segmentation: {} segments -> {} captions", segments.len(), captions.len());

        let captions = fill_gaps(captions, &self.config.timing);
        let captions = resolve_overlaps(captions, &self.config.timing);
        let captions = renumber(captions);

        info!("Caption track ready: {} captions", captions.len());
        captions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Word;

    #[test]
    fn test_pipeline_produces_ordered_numbered_track() {
        let segments = vec![
            Segment::new(0.0, 1.0, "Bonjour à tous."),
            Segment::new(0.9, 1.1, "Amen"),
            Segment::new(1.1, 1.2, "Ah"),
            Segment::new(3.0, 9.0, "Ouvrons nos bibles au livre de Jean chapitre trois verset seize"),
            Segment::new(12.0, 13.0, "Merci Seigneur"),
            Segment::new(13.0, 14.0, "Merci Seigneur"),
            Segment::new(14.0, 15.0, "Merci Seigneur"),
        ];

        let captions = CaptionPipeline::new(&Config::default()).run(segments);

        assert_eq!(
            captions.iter().map(|c| c.index).collect::<Vec<_>>(),
            (1..=captions.len()).collect::<Vec<_>>()
        );
        for caption in &captions {
            assert!(caption.duration() >= 0.5 - 1e-9, "{:?}", caption);
            assert!(caption.text.split_whitespace().count() <= 5);
        }
        for pair in captions.windows(2) {
            assert!(pair[0].end <= pair[1].start + 1e-9, "{:?}", pair);
        }

        let last = captions.last().unwrap();
        assert_eq!(last.text, "Merci Seigneur");
        assert_eq!(last.start, 12.0);
        assert_eq!(last.end, 15.0);
        assert!(captions.iter().all(|c| c.text != "Ah"));
    }

    #[test]
    fn test_pipeline_keeps_every_word_with_timestamps() {
        let tokens = [" Je", " suis", " le", " chemin,", " la", " vérité", " et", " la", " vie."];
        let words: Vec<Word> = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| Word::new(*t, i as f64 * 0.4, (i + 1) as f64 * 0.4))
            .collect();
        let text: String = tokens.concat();
        let segment = Segment::new(0.0, 3.6, text.trim()).with_words(words);

        let captions = CaptionPipeline::new(&Config::default()).run(vec![segment]);
        let rebuilt = captions.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join(" ");
        assert_eq!(rebuilt, "Je suis le chemin, la vérité et la vie.");
    }
}
