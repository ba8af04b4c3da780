use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, VersetError};

/// Linguistic words per caption
pub const MAX_WORDS_PER_CAPTION: usize = 5;
/// Characters per caption
pub const MAX_CHARS_PER_CAPTION: usize = 35;
/// Seconds a caption may stay on screen
pub const MAX_CAPTION_DURATION: f64 = 2.8;
/// Seconds every caption lasts at least once overlaps are resolved
pub const MIN_CAPTION_DURATION: f64 = 0.5;
/// Seconds kept between two captions when one has to be moved
pub const MIN_CAPTION_GAP: f64 = 0.1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub segmentation: SegmentationConfig,
    pub dedup: DedupConfig,
    pub timing: TimingConfig,
    pub alignment: AlignmentConfig,
    pub scripture: ScriptureConfig,
    pub pauses: PauseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Maximum number of linguistic words (after compound merging) per caption
    pub max_words: usize,
    /// Maximum caption length in characters
    pub max_chars: usize,
    /// Maximum caption duration in seconds
    pub max_duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Similarity above which two consecutive segments count as a repetition
    pub similarity_threshold: f64,
    /// Run length from which a repetition run is collapsed
    pub min_run: usize,
    /// Segments with fewer trimmed characters are dropped
    pub min_text_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Gaps strictly above this (seconds) are partially filled
    pub gap_fill_min: f64,
    /// Gaps at or above this (seconds) are left as real silence
    pub gap_fill_max: f64,
    /// Distance kept before the next caption when filling a gap
    pub gap_margin: f64,
    /// Minimum caption duration after overlap resolution
    pub min_duration: f64,
    /// Gap inserted between captions when resolving an overlap
    pub min_gap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Number of leading verse words used to anchor the search
    pub anchor_words: usize,
    /// Number of captions concatenated when looking for the anchor
    pub anchor_window: usize,
    /// Maximum number of captions a verse may span
    pub max_extension: usize,
    /// Non-improving extensions tolerated before stopping
    pub patience: usize,
    /// Coverage above which the search may stop early
    pub early_stop_coverage: f64,
    /// Coverage required to accept an alignment
    pub min_coverage: f64,
    /// Trailing caption word count still absorbed into the verse
    pub lookahead_max_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptureConfig {
    /// Quoted passages shorter than this are ignored
    pub min_quote_chars: usize,
    /// Characters searched before a quote for its reference
    pub lookback_chars: usize,
    /// Reject references whose book or numbers cannot be resolved
    pub strict_references: bool,
    /// Reference used when none can be parsed
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseConfig {
    /// Pause length in milliseconds inserted after each transition
    pub pause_ms: u64,
    /// Case-insensitive regexes marking a transition into prayer
    pub transition_patterns: Vec<String>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_words: MAX_WORDS_PER_CAPTION,
            max_chars: MAX_CHARS_PER_CAPTION,
            max_duration: MAX_CAPTION_DURATION,
        }
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
            min_run: 3,
            min_text_chars: 3,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            gap_fill_min: 1.0,
            gap_fill_max: 5.0,
            gap_margin: MIN_CAPTION_GAP,
            min_duration: MIN_CAPTION_DURATION,
            min_gap: MIN_CAPTION_GAP,
        }
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            anchor_words: 3,
            anchor_window: 4,
            max_extension: 30,
            patience: 3,
            early_stop_coverage: 0.85,
            min_coverage: 0.70,
            lookahead_max_words: 3,
        }
    }
}

impl Default for ScriptureConfig {
    fn default() -> Self {
        Self {
            min_quote_chars: 15,
            lookback_chars: 500,
            strict_references: false,
            placeholder: "VERSET BIBLIQUE".to_string(),
        }
    }
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            pause_ms: 3000,
            transition_patterns: vec![
                r"maintenant[\s,]+prions".to_string(),
                r"prions[\s,]+ensemble".to_string(),
                r"prions[\s,]+maintenant".to_string(),
                r"alors[\s,]+prions".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VersetError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| VersetError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VersetError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| VersetError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that would make a stage loop forever or divide by zero
    pub fn validate(&self) -> Result<()> {
        if self.segmentation.max_words == 0 || self.segmentation.max_chars == 0 {
            return Err(VersetError::Config(
                "segmentation.max_words and segmentation.max_chars must be positive".to_string(),
            ));
        }
        if self.alignment.anchor_words == 0 || self.alignment.anchor_window == 0 {
            return Err(VersetError::Config(
                "alignment.anchor_words and alignment.anchor_window must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dedup.similarity_threshold)
            || !(0.0..=1.0).contains(&self.alignment.min_coverage)
        {
            return Err(VersetError::Config(
                "similarity and coverage thresholds must lie in [0, 1]".to_string(),
            ));
        }
        if self.timing.gap_fill_min >= self.timing.gap_fill_max {
            return Err(VersetError::Config(format!(
                "timing.gap_fill_min ({}) must be below timing.gap_fill_max ({})",
                self.timing.gap_fill_min, self.timing.gap_fill_max
            )));
        }
        Ok(())
    }
}
