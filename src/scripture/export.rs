use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::Result;
use crate::subtitle::format_timecode;

/// One aligned verse, as read by the overlay renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseEntry {
    pub reference: String,
    pub text: String,
    pub start_time_ms: u64,
    pub end_time_ms: u64,
    pub start_time: String,
    pub end_time: String,
}

impl VerseEntry {
    pub fn new(reference: impl Into<String>, text: impl Into<String>, start_time_ms: u64, end_time_ms: u64) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
            start_time_ms,
            end_time_ms,
            start_time: format_timecode(start_time_ms),
            end_time: format_timecode(end_time_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentExport {
    pub bible_verses: Vec<VerseEntry>,
    pub total_verses: usize,
    /// Local time, ISO-8601 without offset
    pub generated_at: String,
}

impl AlignmentExport {
    pub fn new(bible_verses: Vec<VerseEntry>) -> Self {
        Self {
            total_verses: bible_verses.len(),
            bible_verses,
            generated_at: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(path, self.to_json()?).await?;
        info!("Verse metadata saved: {} ({} verses)", path.display(), self.total_verses);
        Ok(())
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_carries_timecodes() {
        let entry = VerseEntry::new("JEAN 3:16", "Car Dieu a tant aimé le monde", 20_000, 29_500);
        assert_eq!(entry.start_time, "00:00:20,000");
        assert_eq!(entry.end_time, "00:00:29,500");
    }

    #[test]
    fn test_json_layout() {
        let export = AlignmentExport::new(vec![VerseEntry::new("PSAUMES 23:1", "L'Éternel est mon berger", 1_000, 4_250)]);
        let value: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();

        assert_eq!(value["total_verses"], 1);
        assert_eq!(value["bible_verses"][0]["reference"], "PSAUMES 23:1");
        assert_eq!(value["bible_verses"][0]["start_time_ms"], 1000);
        assert_eq!(value["bible_verses"][0]["end_time"], "00:00:04,250");
        let generated_at = value["generated_at"].as_str().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(generated_at, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta").join("verses.json");
        let export = AlignmentExport::new(Vec::new());

        export.save(&path).await.unwrap();
        let loaded = AlignmentExport::load(&path).await.unwrap();
        assert_eq!(loaded, export);
        assert_eq!(loaded.total_verses, 0);
    }
}
