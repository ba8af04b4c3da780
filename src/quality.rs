use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::transcript::Transcript;

/// Silence longer than this between two segments is reported
pub const GAP_REPORT_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageRating {
    Good,
    Moderate,
    Low,
    Unknown,
}

impl fmt::Display for CoverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CoverageRating::Good => "good",
            CoverageRating::Moderate => "moderate",
            CoverageRating::Low => "low",
            CoverageRating::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilenceGap {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

/// How much of the audio the recognizer actually transcribed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptQuality {
    pub segment_count: usize,
    pub transcribed_seconds: f64,
    pub audio_duration: Option<f64>,
    pub coverage_percent: Option<f64>,
    /// Share of segments repeating an earlier segment's text
    pub repetitive_segments: f64,
    pub gaps: Vec<SilenceGap>,
}

impl TranscriptQuality {
    pub fn analyze(transcript: &Transcript, audio_duration: Option<f64>) -> Self {
        let segments = &transcript.segments;
        let transcribed_seconds: f64 = segments.iter().map(|s| s.duration().max(0.0)).sum();

        let coverage_percent = audio_duration
            .filter(|d| *d > 0.0)
            .map(|d| transcribed_seconds / d * 100.0);

        let gaps = segments
            .windows(2)
            .filter_map(|pair| {
                let duration = pair[1].start - pair[0].end;
                (duration > GAP_REPORT_THRESHOLD).then(|| SilenceGap {
                    start: pair[0].end,
                    end: pair[1].start,
                    duration,
                })
            })
            .collect();

        let mut text_counts: HashMap<String, usize> = HashMap::new();
        for segment in segments {
            let normalized_text = segment.text.trim().to_lowercase();
            if !normalized_text.is_empty() {
                *text_counts.entry(normalized_text).or_insert(0) += 1;
            }
        }
        let repeated: usize = text_counts.values().filter(|&&n| n > 1).map(|&n| n - 1).sum();
        let repetitive_segments = if segments.is_empty() {
            0.0
        } else {
            repeated as f64 / segments.len() as f64
        };

        Self {
            segment_count: segments.len(),
            transcribed_seconds,
            audio_duration,
            coverage_percent,
            repetitive_segments,
            gaps,
        }
    }

    pub fn rating(&self) -> CoverageRating {
        match self.coverage_percent {
            None => CoverageRating::Unknown,
            Some(p) if p < 70.0 => CoverageRating::Low,
            Some(p) if p < 85.0 => CoverageRating::Moderate,
            Some(_) => CoverageRating::Good,
        }
    }

    pub fn has_gaps(&self) -> bool {
        !self.gaps.is_empty()
    }

    pub fn summary(&self) -> String {
        let coverage = match self.coverage_percent {
            Some(p) => format!("{:.1}% of audio ({})", p, self.rating()),
            None => "audio duration unknown".to_string(),
        };
        format!(
            "{} segments, {:.1}s transcribed, {}, {:.0}% repeated, {} gap(s) over {:.0}s",
            self.segment_count,
            self.transcribed_seconds,
            coverage,
            self.repetitive_segments * 100.0,
            self.gaps.len(),
            GAP_REPORT_THRESHOLD
        )
    }
}
