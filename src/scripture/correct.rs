use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::align::AlignmentResult;
use super::quotes::Verse;
use crate::config::AlignmentConfig;
use crate::error::{Result, VersetError};
use crate::subtitle::Caption;
use crate::text::{coverage, ends_sentence, normalize};

/// "dit «": the speaker already opened the quotation
static SPEECH_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdit\s*«").expect("valid speech cue regex"));

static INTRODUCER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\bdit|:)\s+").expect("valid introducer regex"));

const ALL_QUOTES: &[char] = &['«', '»', '"', '“', '”'];
const CLOSING_QUOTES: &[char] = &['»', '"', '“', '”'];

/// Outcome of a quote correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionReport {
    /// Caption where the quotation opens
    pub verse_start: usize,
    /// Verse coverage of the corrected captions
    pub coverage: f64,
    pub low_coverage: bool,
}

/// Rewrites the quotation marks of an aligned caption range.
///
/// Exactly one `«` opens the passage and one `»` closes it; every other
/// quote character in the range is removed.
pub struct QuoteCorrector {
    min_coverage: f64,
}

impl QuoteCorrector {
    pub fn new(config: &AlignmentConfig) -> Self {
        Self {
            min_coverage: config.min_coverage,
        }
    }

    pub fn correct_quotes(&self, captions: &mut [Caption], alignment: &AlignmentResult, verse: &Verse) -> Result<CorrectionReport> {
        let start = alignment.start_index;
        let end = alignment.end_index;
        if start > end || end >= captions.len() {
            return Err(VersetError::Alignment(format!(
                "caption range {}..={} outside track of {} captions",
                start,
                end,
                captions.len()
            )));
        }

        let verse_start = self.find_verse_start(captions, start, end, verse);
        let cue = (verse_start.saturating_sub(2)..=verse_start).find(|&i| SPEECH_CUE.is_match(&captions[i].text));

        for (i, caption) in captions.iter_mut().enumerate().take(end + 1).skip(start) {
            let stripped = if cue == Some(i) { CLOSING_QUOTES } else { ALL_QUOTES };
            caption.text = caption.text.replace(stripped, "").trim().to_string();
        }

        match cue {
            Some(i) => debug!("Keeping opening quote of caption {}", captions[i].index),
            None => {
                let text = &captions[verse_start].text;
                let opened = if INTRODUCER.is_match(text) {
                    INTRODUCER.replacen(text, 1, "$1 « ").into_owned()
                } else {
                    format!("« {}", text)
                };
                captions[verse_start].text = opened;
            }
        }

        let closing = &mut captions[end].text;
        let mut text = closing.trim_end().to_string();
        if !ends_sentence(&text) {
            text.push('.');
        }
        text.push_str(" »");
        *closing = text;

        let joined = captions[verse_start..=end]
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let coverage = coverage(&verse.word_set, &joined);
        let low_coverage = coverage < self.min_coverage;

        if low_coverage {
            warn!(
                "Corrected captions {}..{} cover only {:.0}% of '{}'",
                captions[verse_start].index,
                captions[end].index,
                coverage * 100.0,
                verse.preview(40)
            );
        }

        Ok(CorrectionReport {
            verse_start,
            coverage,
            low_coverage,
        })
    }

    /// First caption among the first five of the range sharing two of the
    /// verse's opening words
    fn find_verse_start(&self, captions: &[Caption], start: usize, end: usize, verse: &Verse) -> usize {
        let opening: Vec<&str> = verse.words().into_iter().take(3).collect();

        (start..(start + 5).min(end + 1))
            .find(|&i| {
                let normalized = normalize(&captions[i].text);
                let words: Vec<&str> = normalized.split_whitespace().collect();
                opening.iter().filter(|w| words.contains(w)).count() >= 2
            })
            .unwrap_or(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(texts: &[&str]) -> Vec<Caption> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Caption::new(i + 1, i as f64, i as f64 + 0.9, *t))
            .collect()
    }

    fn corrector() -> QuoteCorrector {
        QuoteCorrector::new(&AlignmentConfig::default())
    }

    fn range(start_index: usize, end_index: usize) -> AlignmentResult {
        AlignmentResult {
            start_index,
            end_index,
            coverage: 1.0,
        }
    }

    #[test]
    fn test_opening_inserted_after_colon() {
        let mut captions = track(&["Jésus répond : Je suis", "« le chemin, la vérité »", "et la vie"]);
        let verse = Verse::new("Je suis le chemin, la vérité et la vie", 0);

        let report = corrector().correct_quotes(&mut captions, &range(0, 2), &verse).unwrap();

        assert_eq!(captions[0].text, "Jésus répond : « Je suis");
        assert_eq!(captions[1].text, "le chemin, la vérité");
        assert_eq!(captions[2].text, "et la vie. »");
        assert_eq!(report.verse_start, 0);
        assert_eq!(report.coverage, 1.0);
        assert!(!report.low_coverage);
    }

    #[test]
    fn test_existing_speech_cue_is_kept() {
        let mut captions = track(&["Et Dieu dit «", "Que la lumière soit »", "Et la lumière fut", "Amen"]);
        let verse = Verse::new("Que la lumière soit ! Et la lumière fut.", 0);

        let report = corrector().correct_quotes(&mut captions, &range(1, 2), &verse).unwrap();

        assert_eq!(captions[0].text, "Et Dieu dit «");
        assert_eq!(captions[1].text, "Que la lumière soit");
        assert_eq!(captions[2].text, "Et la lumière fut. »");
        assert_eq!(captions[3].text, "Amen");
        assert_eq!(report.verse_start, 1);
    }

    #[test]
    fn test_opening_prepended_without_introducer() {
        let mut captions = track(&["Venez à moi", "vous tous qui êtes fatigués !"]);
        let verse = Verse::new("Venez à moi, vous tous qui êtes fatigués", 0);

        corrector().correct_quotes(&mut captions, &range(0, 1), &verse).unwrap();

        assert_eq!(captions[0].text, "« Venez à moi");
        assert_eq!(captions[1].text, "vous tous qui êtes fatigués ! »");
    }

    #[test]
    fn test_verse_start_skips_leading_caption() {
        let mut captions = track(&["Il nous dit aujourd'hui", "heureux les pauvres", "en esprit"]);
        let verse = Verse::new("Heureux les pauvres en esprit", 0);

        let report = corrector().correct_quotes(&mut captions, &range(0, 2), &verse).unwrap();

        assert_eq!(report.verse_start, 1);
        assert_eq!(captions[0].text, "Il nous dit aujourd'hui");
        assert_eq!(captions[1].text, "« heureux les pauvres");
        assert_eq!(captions[2].text, "en esprit. »");
    }

    #[test]
    fn test_low_coverage_is_flagged_not_fatal() {
        let mut captions = track(&["Heureux les doux", "amen"]);
        let verse = Verse::new("Heureux les doux car ils hériteront la terre promise", 0);

        let report = corrector().correct_quotes(&mut captions, &range(0, 1), &verse).unwrap();
        assert!(report.low_coverage);
    }

    #[test]
    fn test_range_outside_track_is_an_error() {
        let mut captions = track(&["un"]);
        let verse = Verse::new("un deux trois", 0);
        assert!(corrector().correct_quotes(&mut captions, &range(0, 3), &verse).is_err());
    }
}
