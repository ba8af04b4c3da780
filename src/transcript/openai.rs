// OpenAI Whisper JSON output (`whisper --output_format json --word_timestamps True`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, VersetError};
use super::{TranscriptLoader, common::{Segment, Transcript, TranscriptMapper, Word}};

/// OpenAI Whisper specific JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIWhisperOutput {
    #[serde(default)]
    pub text: String,
    pub segments: Vec<OpenAIWhisperSegment>,
    pub language: Option<String>,
}

/// OpenAI Whisper specific segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIWhisperSegment {
    #[serde(default)]
    pub id: u64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub words: Option<Vec<OpenAIWhisperWord>>,
    pub no_speech_prob: Option<f64>,
}

/// Word entry emitted when word timestamps are enabled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIWhisperWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub probability: Option<f64>,
}

/// Mapper for OpenAI Whisper format to the service-agnostic transcript
pub struct OpenAIWhisperMapper;

impl TranscriptMapper<OpenAIWhisperOutput> for OpenAIWhisperMapper {
    fn to_transcript(whisper_output: OpenAIWhisperOutput) -> Result<Transcript> {
        let mut segments = Vec::with_capacity(whisper_output.segments.len());

        for seg in whisper_output.segments {
            if seg.end < seg.start {
                return Err(VersetError::Transcript(format!(
                    "Segment {} ends before it starts ({} < {})",
                    seg.id, seg.end, seg.start
                )));
            }

            // Keep the raw word text: its leading space marks a word boundary
            let words = seg
                .words
                .unwrap_or_default()
                .into_iter()
                .map(|w| Word::new(w.word, w.start, w.end.max(w.start)))
                .collect();

            segments.push(Segment {
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
                words,
            });
        }

        Ok(Transcript {
            language: whisper_output.language.unwrap_or_else(|| "unknown".to_string()),
            segments,
            model_info: Some("OpenAI Whisper".to_string()),
        })
    }
}

/// Loads transcripts written by the OpenAI Whisper CLI
pub struct OpenAILoader;

impl OpenAILoader {
    pub fn parse(json_content: &str) -> Result<Transcript> {
        let output: OpenAIWhisperOutput = serde_json::from_str(json_content)
            .map_err(|e| VersetError::Transcript(format!("Failed to parse OpenAI Whisper JSON: {}", e)))?;
        OpenAIWhisperMapper::to_transcript(output)
    }
}

#[async_trait]
impl TranscriptLoader for OpenAILoader {
    async fn load(&self, path: &Path) -> Result<Transcript> {
        debug!("Loading OpenAI Whisper transcript: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_word_timestamps() {
        let json = r#"{
            "text": " Bonjour à tous.",
            "language": "fr",
            "segments": [{
                "id": 0, "start": 0.0, "end": 1.5, "text": " Bonjour à tous.",
                "words": [
                    {"word": " Bonjour", "start": 0.0, "end": 0.6, "probability": 0.9},
                    {"word": " à", "start": 0.6, "end": 0.8, "probability": 0.9},
                    {"word": " tous.", "start": 0.8, "end": 1.5, "probability": 0.9}
                ]
            }]
        }"#;

        let transcript = OpenAILoader::parse(json).unwrap();
        assert_eq!(transcript.language, "fr");
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.segments[0].text, "Bonjour à tous.");
        assert_eq!(transcript.segments[0].words.len(), 3);
        assert_eq!(transcript.segments[0].words[0].text, " Bonjour");
    }

    #[test]
    fn test_parse_without_words_falls_back_to_empty_list() {
        let json = r#"{"segments": [{"start": 1.0, "end": 2.0, "text": "Amen"}]}"#;
        let transcript = OpenAILoader::parse(json).unwrap();
        assert!(!transcript.segments[0].has_words());
        assert_eq!(transcript.language, "unknown");
    }

    #[test]
    fn test_parse_rejects_reversed_segment() {
        let json = r#"{"segments": [{"id": 3, "start": 2.0, "end": 1.0, "text": "x"}]}"#;
        assert!(OpenAILoader::parse(json).is_err());
    }
}
