//! Scripture quotations: detection in the sermon text, citation parsing,
//! alignment against the caption track and quote-mark correction.

pub mod align;
pub mod books;
pub mod correct;
pub mod export;
pub mod numbers;
pub mod quotes;
pub mod reference;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::subtitle::Caption;

pub use align::{AlignmentResult, Aligner};
pub use correct::{CorrectionReport, QuoteCorrector};
pub use export::{AlignmentExport, VerseEntry};
pub use quotes::{QuoteDetector, Verse};
pub use reference::{parse_reference, Reference, ReferenceParser};

/// Verses of one source text placed on a caption track
#[derive(Debug, Default)]
pub struct LinkedVerses {
    pub entries: Vec<VerseEntry>,
    /// Verses with no caption range good enough
    pub unmatched: Vec<Verse>,
}

/// Detect every quoted verse in `source`, align it with `captions`, fix the
/// quotation marks of the matched range and collect the export entries.
pub fn link_verses(source: &str, captions: &mut [Caption], config: &Config) -> Result<LinkedVerses> {
    let verses = QuoteDetector::new(&config.scripture).detect(source);
    let aligner = Aligner::new(&config.alignment);
    let corrector = QuoteCorrector::new(&config.alignment);
    let references = ReferenceParser::new(&config.scripture);

    let mut linked = LinkedVerses::default();

    for (number, verse) in verses.into_iter().enumerate() {
        let Some(alignment) = aligner.align(&verse, captions) else {
            warn!("Verse #{} not found in captions: '{}'", number + 1, verse.preview(60));
            linked.unmatched.push(verse);
            continue;
        };

        let reference = references.reference_for(source, verse.source_position);
        let report = corrector.correct_quotes(captions, &alignment, &verse)?;

        let start_ms = captions[report.verse_start].start_ms();
        let end_ms = captions[alignment.end_index].end_ms();
        info!(
            "Verse #{} {} -> captions {}..{} ({:.2}s - {:.2}s, coverage {:.0}%)",
            number + 1,
            reference,
            captions[report.verse_start].index,
            captions[alignment.end_index].index,
            start_ms as f64 / 1000.0,
            end_ms as f64 / 1000.0,
            alignment.coverage * 100.0
        );

        linked
            .entries
            .push(VerseEntry::new(reference, verse.content.clone(), start_ms, end_ms));
    }

    info!(
        "Linked {}/{} verse(s)",
        linked.entries.len(),
        linked.entries.len() + linked.unmatched.len()
    );
    Ok(linked)
}
