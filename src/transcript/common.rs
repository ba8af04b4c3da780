use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single recognized word with its timing, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Raw token text; recognizers usually keep a leading space on word starts
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Service-agnostic recognizer segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Word-level timestamps, empty when the recognizer did not provide them
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            words: Vec::new(),
        }
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = words;
        self
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }
}

/// Service-agnostic transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub language: String,
    pub segments: Vec<Segment>,
    pub model_info: Option<String>,
}

impl Transcript {
    /// End of the last segment, if any
    pub fn duration(&self) -> Option<f64> {
        self.segments.last().map(|seg| seg.end)
    }

    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Trait for converting service-specific recognizer output to a [`Transcript`]
pub trait TranscriptMapper<T> {
    fn to_transcript(service_output: T) -> Result<Transcript>;
}
