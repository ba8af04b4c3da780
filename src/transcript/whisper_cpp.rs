// whisper.cpp JSON output (`whisper-cli -oj`)
//
// whisper.cpp only reports segment offsets, so these transcripts always go
// through the proportional-time fallback of the segmenter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, VersetError};
use super::{TranscriptLoader, common::{Segment, Transcript, TranscriptMapper}};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOutput {
    pub result: Option<WhisperCppResult>,
    pub transcription: Vec<WhisperCppSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppResult {
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppSegment {
    pub timestamps: Option<WhisperCppTimestamps>,
    pub offsets: WhisperCppOffsets,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppTimestamps {
    pub from: String,
    pub to: String,
}

/// Segment bounds in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperCppOffsets {
    pub from: i64,
    pub to: i64,
}

pub struct WhisperCppMapper;

impl TranscriptMapper<WhisperCppOutput> for WhisperCppMapper {
    fn to_transcript(whisper_output: WhisperCppOutput) -> Result<Transcript> {
        let language = whisper_output
            .result
            .map(|r| r.language)
            .unwrap_or_else(|| "unknown".to_string());

        let segments = whisper_output
            .transcription
            .into_iter()
            .enumerate()
            .map(|(id, seg)| {
                if seg.offsets.to < seg.offsets.from || seg.offsets.from < 0 {
                    return Err(VersetError::Transcript(format!(
                        "Invalid offsets for segment {}: {} -> {}",
                        id, seg.offsets.from, seg.offsets.to
                    )));
                }
                // Convert ms to seconds
                Ok(Segment::new(
                    seg.offsets.from as f64 / 1000.0,
                    seg.offsets.to as f64 / 1000.0,
                    seg.text.trim(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Transcript {
            language,
            segments,
            model_info: Some("Whisper.cpp".to_string()),
        })
    }
}

/// Loads transcripts written by whisper.cpp
pub struct WhisperCppLoader;

impl WhisperCppLoader {
    pub fn parse(json_content: &str) -> Result<Transcript> {
        let output: WhisperCppOutput = serde_json::from_str(json_content)
            .map_err(|e| VersetError::Transcript(format!("Failed to parse whisper.cpp JSON: {}", e)))?;
        WhisperCppMapper::to_transcript(output)
    }
}

#[async_trait]
impl TranscriptLoader for WhisperCppLoader {
    async fn load(&self, path: &Path) -> Result<Transcript> {
        debug!("Loading whisper.cpp transcript: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    fn name(&self) -> &'static str {
        "whisper-cpp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_converted_to_seconds() {
        let json = r#"{
            "result": {"language": "fr"},
            "transcription": [
                {"timestamps": {"from": "00:00:00,000", "to": "00:00:02,500"},
                 "offsets": {"from": 0, "to": 2500},
                 "text": " Que la paix soit avec vous."}
            ]
        }"#;

        let transcript = WhisperCppLoader::parse(json).unwrap();
        assert_eq!(transcript.language, "fr");
        let segment = &transcript.segments[0];
        assert_eq!(segment.start, 0.0);
        assert_eq!(segment.end, 2.5);
        assert_eq!(segment.text, "Que la paix soit avec vous.");
        assert!(!segment.has_words());
        assert_eq!(transcript.model_info.as_deref(), Some("Whisper.cpp"));
    }
}
