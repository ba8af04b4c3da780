//! Silent pauses after spoken invitations to pray.
//!
//! When the preacher says "maintenant prions" the voice track gets a few
//! seconds of silence after that caption, so every later caption moves by
//! the same amount.

use regex::Regex;
use tracing::{debug, info};

use crate::config::PauseConfig;
use crate::error::{Result, VersetError};
use crate::subtitle::Caption;

/// Compiled transition phrases, matched against lowercase caption text
pub struct TransitionDetector {
    patterns: Vec<Regex>,
}

impl TransitionDetector {
    pub fn new(config: &PauseConfig) -> Result<Self> {
        let patterns = config
            .transition_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| VersetError::Config(format!("invalid transition pattern '{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// End time, in seconds, of every caption announcing a prayer
    pub fn detect_transitions(&self, captions: &[Caption]) -> Vec<f64> {
        let mut points = Vec::new();

        for caption in captions {
            let text = caption.text.to_lowercase();
            if self.patterns.iter().any(|p| p.is_match(&text)) {
                debug!("Transition detected: '{}' at {:.2}s", caption.text, caption.end);
                points.push(caption.end);
            }
        }

        info!("{} prayer transition(s) detected", points.len());
        points
    }
}

/// Delay each caption by `pause` seconds per transition point at or before
/// its start
pub fn apply_pauses(captions: Vec<Caption>, points: &[f64], pause: f64) -> Vec<Caption> {
    captions
        .into_iter()
        .map(|mut caption| {
            let before = points.iter().filter(|&&p| p <= caption.start).count();
            let delay = pause * before as f64;
            caption.start += delay;
            caption.end += delay;
            caption
        })
        .collect()
}
