// Recognizer output loaders
//
// Each supported recognizer writes its own JSON layout. A loader parses that
// layout and maps it onto the service-agnostic `Transcript`:
// - OpenAI: OpenAI Whisper JSON, with word timestamps when enabled
// - WhisperCpp: whisper.cpp JSON, segment offsets only
//
// To add a new recognizer:
// 1. Create service-specific data structures for parsing its JSON
// 2. Implement TranscriptMapper for them
// 3. Add the format to TranscriptFormat and to the factory

pub mod common;
pub mod openai;
pub mod whisper_cpp;

use async_trait::async_trait;
use std::path::Path;
use std::str::FromStr;

pub use common::*;
use crate::error::{Result, VersetError};

/// Main trait for loading recognizer output
#[async_trait]
pub trait TranscriptLoader: Send + Sync {
    /// Load and map a recognizer output file
    async fn load(&self, path: &Path) -> Result<Transcript>;

    /// Short format name used in logs
    fn name(&self) -> &'static str;
}

/// Recognizer output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    OpenAI,
    WhisperCpp,
}

impl FromStr for TranscriptFormat {
    type Err = VersetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "whisper" => Ok(TranscriptFormat::OpenAI),
            "whisper-cpp" | "whisper_cpp" | "whispercpp" => Ok(TranscriptFormat::WhisperCpp),
            _ => Err(VersetError::UnsupportedFormat(format!(
                "Invalid transcript format '{}'. Valid formats: openai, whisper-cpp",
                s
            ))),
        }
    }
}

/// Factory for creating loader instances
pub struct TranscriptLoaderFactory;

impl TranscriptLoaderFactory {
    pub fn create_loader(format: TranscriptFormat) -> Box<dyn TranscriptLoader> {
        match format {
            TranscriptFormat::OpenAI => Box::new(openai::OpenAILoader),
            TranscriptFormat::WhisperCpp => Box::new(whisper_cpp::WhisperCppLoader),
        }
    }

    /// OpenAI Whisper is the default since it carries word timestamps
    pub fn create_default() -> Box<dyn TranscriptLoader> {
        Self::create_loader(TranscriptFormat::OpenAI)
    }
}
