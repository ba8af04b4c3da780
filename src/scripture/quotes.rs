use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::config::ScriptureConfig;
use crate::text::{normalize, word_set};

/// Colon, optional spaces, then a guillemet-delimited passage
static QUOTED_PASSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*«\s*([^»]+?)\s*»").expect("valid quoted passage regex"));

/// A passage quoted in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Verse {
    /// Quoted text as written in the source
    pub content: String,
    pub normalized: String,
    pub word_set: HashSet<String>,
    /// Byte offset of `content` in the source text
    pub source_position: usize,
}

impl Verse {
    pub fn new(content: impl Into<String>, source_position: usize) -> Self {
        let content = content.into();
        let normalized = normalize(&content);
        let word_set = word_set(&normalized);
        Self {
            content,
            normalized,
            word_set,
            source_position,
        }
    }

    /// Normalized words in reading order
    pub fn words(&self) -> Vec<&str> {
        self.normalized.split_whitespace().collect()
    }

    pub fn preview(&self, max_chars: usize) -> String {
        self.content.chars().take(max_chars).collect()
    }
}

/// Finds the passages a preacher reads out, introduced by `: «`
pub struct QuoteDetector {
    min_quote_chars: usize,
}

impl QuoteDetector {
    pub fn new(config: &ScriptureConfig) -> Self {
        Self {
            min_quote_chars: config.min_quote_chars,
        }
    }

    pub fn detect(&self, source: &str) -> Vec<Verse> {
        let mut verses = Vec::new();

        for captures in QUOTED_PASSAGE.captures_iter(source) {
            let Some(passage) = captures.get(1) else {
                continue;
            };
            let content = passage.as_str().trim();

            if content.chars().count() < self.min_quote_chars {
                debug!("Ignoring short quotation: '{}'", content);
                continue;
            }

            let verse = Verse::new(content, passage.start());
            debug!("Verse #{} detected: '{}'", verses.len() + 1, verse.preview(60));
            verses.push(verse);
        }

        info!("Detected {} quoted verse(s) in source text", verses.len());
        verses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> QuoteDetector {
        QuoteDetector::new(&ScriptureConfig::default())
    }

    #[test]
    fn test_detects_colon_introduced_quotes() {
        let source = "Jésus dit dans Jean trois seize : « Car Dieu a tant aimé le monde qu'il a donné son Fils. » \
                      Puis il ajoute : «Oui.» Et encore:\n«Venez à moi, vous tous qui êtes fatigués\net chargés»";
        let verses = detector().detect(source);

        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].content, "Car Dieu a tant aimé le monde qu'il a donné son Fils.");
        assert_eq!(&source[verses[0].source_position..verses[0].source_position + 3], "Car");
        assert!(verses[1].content.contains('\n'));
        assert!(verses[1].word_set.contains("fatigués"));
    }

    #[test]
    fn test_quotes_without_colon_are_ignored() {
        let source = "Il a appelé cela « le grand commandement de la loi » hier.";
        assert!(detector().detect(source).is_empty());
    }

    #[test]
    fn test_verse_words_are_normalized() {
        let verse = Verse::new("Heureux les pauvres en esprit, car le royaume...", 0);
        assert_eq!(verse.words()[..3], ["heureux", "les", "pauvres"]);
        assert_eq!(verse.word_set.len(), 8);
    }
}
