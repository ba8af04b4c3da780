//! Book/chapter/verse citations spoken before a quoted passage.
//!
//! Preachers announce a passage in many shapes: "dans Matthieu chapitre six
//! verset trente-et-un", "selon Jean trois seize", "en premier Jean 3:16".
//! Each shape is one [`ReferencePattern`]. All of them run over the text just
//! before the quote and the match ending closest to the quote wins; on equal
//! distance the earlier pattern in [`PATTERNS`] is kept.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

use super::books::{lookup_book, lookup_volume};
use super::numbers::{convert_number, ordinal_value, spoken_to_digits};
use crate::config::ScriptureConfig;

/// A resolved citation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Canonical uppercase book name, volume included (`1 JEAN`)
    pub book: String,
    pub chapter: String,
    /// Single verse or `start-end`
    pub verses: String,
    /// `BOOK CH:VS` or `BOOK CH:VS-VE`
    pub formatted: String,
    /// Byte offset where the citation starts
    pub source_position: usize,
}

impl Reference {
    pub fn new(book: impl Into<String>, chapter: impl Into<String>, verses: impl Into<String>, source_position: usize) -> Self {
        let book = book.into();
        let chapter = chapter.into();
        let verses = verses.into();
        let formatted = format!("{} {}:{}", book, chapter, verses);
        Self {
            book,
            chapter,
            verses,
            formatted,
            source_position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// "dans Matthieu chapitre six verset trente-et-un"
    ChapterVerse,
    /// "en Jean chapitre trois versets seize à dix-sept"
    ChapterVerseRange,
    /// "dans Matthieu au chapitre six verset trente-et-un"
    AtChapterVerse,
    /// "en deux Corinthiens, un verset trois et quatre"
    VolumeFirstChapter,
    /// "dans Psaume trente-quatre verset dix-huit"
    Standard,
    /// "dans psaume vingt-trois un :"
    BeforeColon,
    /// "il est dit dans Matthieu six trente-et-un"
    SaidIn,
    /// "dans Matthieu six trente-et-un à trente-trois"
    SpokenRange,
    /// "et dans Philippiens quatre dix-neuf"
    AndIn,
    /// "dans Matthieu six, verset trente-et-un"
    WithComma,
    /// "Psaume vingt-trois, un"
    Compact,
    /// "selon Matthieu six trente-et-un", "d'après Jean trois seize"
    According,
    /// "dans premier Jean trois seize"
    WrittenVolume,
    /// "dans Psaume 34 verset 18"
    Digits,
    /// "en Matthieu 6:31-33", "selon 1 Jean 3:16"
    Notation,
}

pub struct ReferencePattern {
    pub kind: PatternKind,
    regex: Regex,
}

impl ReferencePattern {
    fn new(kind: PatternKind, pattern: &str) -> Self {
        let regex = Regex::new(&format!("(?i){}", pattern)).expect("valid reference regex");
        Self { kind, regex }
    }
}

/// Patterns in priority order
pub static PATTERNS: LazyLock<Vec<ReferencePattern>> = LazyLock::new(|| {
    const WORD: &str = r"[\p{L}\-]+";
    const VOLUME: &str = r"premier|première|premiere|deuxième|deuxieme|second|seconde|troisième|troisieme";

    let p = |template: &str| template.replace("{W}", WORD).replace("{V}", VOLUME);
    use PatternKind::*;

    vec![
        ReferencePattern::new(
            ChapterVerse,
            &p(r"\bdans\s+(?:le\s+)?(?P<book>{W})\s+chapitres?\s+(?P<chapter>{W})\s+versets?\s+(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            ChapterVerseRange,
            &p(r"\ben\s+(?P<book>{W})\s+chapitres?\s+(?P<chapter>{W})\s+versets?\s+(?P<verse>{W})(?:\s+à\s+(?P<verse_end>{W}))?"),
        ),
        ReferencePattern::new(
            AtChapterVerse,
            &p(r"\bdans\s+(?P<book>{W})\s+au\s+chapitres?\s+(?P<chapter>{W})\s+versets?\s+(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            VolumeFirstChapter,
            &p(r"\ben\s+(?P<volume>{W})\s+(?P<book>{W})\s*,?\s*(?P<chapter>un|une)\s+versets?\s+(?P<verse>{W})(?:\s+et\s+(?P<verse_end>{W}))?"),
        ),
        ReferencePattern::new(
            Standard,
            &p(r"\b(?:dans|en|et\s+en)\s+(?:le\s+)?(?P<book>{W})\s+(?P<chapter>{W})\s+versets?\s+(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            BeforeColon,
            &p(r"\bdans\s+(?P<book>{W})\s+(?P<chapter>{W})\s+(?P<verse>{W})\s*:"),
        ),
        ReferencePattern::new(
            SaidIn,
            &p(r"\bdit\s+dans\s+(?P<book>{W})\s+(?P<chapter>{W})\s+(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            SpokenRange,
            &p(r"\bdans\s+(?P<book>{W})\s+(?P<chapter>{W})\s+(?P<verse>{W})\s+à\s+(?P<verse_end>{W})"),
        ),
        ReferencePattern::new(
            AndIn,
            &p(r"\bet\s+dans\s+(?P<book>{W})\s+(?P<chapter>{W})\s+(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            WithComma,
            &p(r"\bdans\s+(?P<book>{W})\s+(?P<chapter>{W})\s*,\s*(?:versets?\s+)?(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            Compact,
            &p(r"\b(?P<book>{W})\s+(?P<chapter>{W})\s*,\s*(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            According,
            &p(r"(?:\bselon|\bd['’]après)\s+(?P<book>{W})\s+(?P<chapter>{W})\s+(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            WrittenVolume,
            &p(r"\b(?:dans|en)\s+(?:le\s+)?(?P<volume>{V})\s+(?P<book>{W})\s+(?P<chapter>{W})\s+(?:versets?\s+)?(?P<verse>{W})"),
        ),
        ReferencePattern::new(
            Digits,
            &p(r"\bdans\s+(?:le\s+)?(?P<book>\p{L}+)\s+(?P<chapter>\d+)(?:,?\s*versets?\s*(?P<verse>\d+))?"),
        ),
        ReferencePattern::new(
            Notation,
            &p(r"\b(?:en|selon|dans)\s+(?:(?P<volume>[1-3])\s+)?(?P<book>\p{L}+)\s+(?P<chapter>\d+):(?P<verse>\d+)(?:-(?P<verse_end>\d+))?"),
        ),
    ]
});

/// Parse the citation closest to the end of `window` with default settings
pub fn parse_reference(window: &str) -> Option<Reference> {
    ReferenceParser::new(&ScriptureConfig::default()).parse(window)
}

pub struct ReferenceParser {
    lookback_chars: usize,
    strict: bool,
    placeholder: String,
}

impl ReferenceParser {
    pub fn new(config: &ScriptureConfig) -> Self {
        Self {
            lookback_chars: config.lookback_chars,
            strict: config.strict_references,
            placeholder: config.placeholder.clone(),
        }
    }

    /// Citation whose match ends closest to the end of `window`
    pub fn parse(&self, window: &str) -> Option<Reference> {
        let mut best: Option<(usize, Reference)> = None;

        for pattern in PATTERNS.iter() {
            for captures in pattern.regex.captures_iter(window) {
                let Some(whole) = captures.get(0) else {
                    continue;
                };
                let distance = window.len() - whole.end();
                if best.as_ref().is_some_and(|(d, _)| distance >= *d) {
                    continue;
                }

                if let Some(reference) = self.resolve(pattern.kind, &captures, whole.start()) {
                    debug!("{:?} candidate '{}' at distance {}", pattern.kind, reference.formatted, distance);
                    best = Some((distance, reference));
                }
            }
        }

        best.map(|(_, reference)| reference)
    }

    /// Citation announced before the quote starting at byte `position`
    pub fn locate(&self, source: &str, position: usize) -> Option<Reference> {
        let prefix = source.get(..position)?;
        if self.lookback_chars == 0 {
            return None;
        }
        let window_start = prefix
            .char_indices()
            .rev()
            .nth(self.lookback_chars - 1)
            .map(|(i, _)| i)
            .unwrap_or(0);

        self.parse(&prefix[window_start..]).map(|mut reference| {
            reference.source_position += window_start;
            reference
        })
    }

    /// Formatted citation for a quote, or the placeholder when none is found
    pub fn reference_for(&self, source: &str, position: usize) -> String {
        match self.locate(source, position) {
            Some(reference) => reference.formatted,
            None => {
                debug!("No reference found before position {}", position);
                self.placeholder.clone()
            }
        }
    }

    fn resolve(&self, kind: PatternKind, captures: &Captures, start: usize) -> Option<Reference> {
        let book_raw = captures.name("book")?.as_str();
        let volume = captures.name("volume").map(|m| m.as_str());

        let book = match self.resolve_book(volume, book_raw) {
            Some(book) => book,
            None if self.strict || kind == PatternKind::Compact => return None,
            None => fallback_book(volume, book_raw),
        };

        let chapter = self.number(captures.name("chapter").map(|m| m.as_str()))?;
        let verse = match captures.name("verse") {
            Some(m) => self.number(Some(m.as_str()))?,
            None => convert_number(""),
        };
        let verses = match captures.name("verse_end") {
            Some(m) => format!("{}-{}", verse, self.number(Some(m.as_str()))?),
            None => verse,
        };

        Some(Reference::new(book, chapter, verses, start))
    }

    fn resolve_book(&self, volume: Option<&str>, book_raw: &str) -> Option<String> {
        match volume {
            Some(volume) => {
                let compound = format!("{} {}", volume, book_raw);
                lookup_book(&compound)
                    .or_else(|| ordinal_value(volume).and_then(|n| lookup_volume(n, book_raw)))
                    .map(str::to_string)
            }
            None => lookup_book(book_raw).map(str::to_string),
        }
    }

    fn number(&self, token: Option<&str>) -> Option<String> {
        let token = token?;
        if self.strict {
            spoken_to_digits(token)
        } else {
            Some(convert_number(token))
        }
    }
}

fn fallback_book(volume: Option<&str>, book_raw: &str) -> String {
    match volume.and_then(ordinal_value) {
        Some(n) => format!("{} {}", n, book_raw.to_uppercase()),
        None => book_raw.to_uppercase(),
    }
}
