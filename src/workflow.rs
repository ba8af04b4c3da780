use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::captions::CaptionPipeline;
use crate::config::Config;
use crate::error::{Result, VersetError};
use crate::pauses::{apply_pauses, TransitionDetector};
use crate::quality::{CoverageRating, TranscriptQuality};
use crate::scripture::{link_verses, AlignmentExport, QuoteDetector, ReferenceParser, Verse};
use crate::subtitle::{read_srt, shift_captions, write_srt, Caption};
use crate::transcript::{TranscriptFormat, TranscriptLoaderFactory};

/// A quotation found in a source text and the citation announced before it
#[derive(Debug, Clone)]
pub struct QuotedReference {
    pub reference: String,
    pub verse: Verse,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

pub struct Workflow {
    config: Config,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turn one recognizer JSON file into an SRT caption track
    pub async fn generate_captions<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        format: TranscriptFormat,
        audio_duration: Option<f64>,
    ) -> Result<Vec<Caption>> {
        let input_path = input_path.as_ref();
        info!("Generating captions from {}", input_path.display());

        let loader = TranscriptLoaderFactory::create_loader(format);
        let transcript = loader.load(input_path).await?;
        info!(
            "Loaded {} segments ({}, language: {})",
            transcript.segments.len(),
            transcript.model_info.as_deref().unwrap_or(loader.name()),
            transcript.language
        );

        let quality = TranscriptQuality::analyze(&transcript, audio_duration);
        match quality.rating() {
            CoverageRating::Low | CoverageRating::Moderate => warn!("Transcript quality: {}", quality.summary()),
            _ => info!("Transcript quality: {}", quality.summary()),
        }
        for gap in &quality.gaps {
            warn!("No speech from {:.1}s to {:.1}s ({:.1}s)", gap.start, gap.end, gap.duration);
        }

        let captions = CaptionPipeline::new(&self.config).run(transcript.segments);
        write_srt(&captions, output_path).await?;

        Ok(captions)
    }

    /// Generate captions for every recognizer JSON file under `input_dir`,
    /// mirroring the directory layout into `output_dir`
    pub async fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Option<Q>,
        format: TranscriptFormat,
    ) -> Result<BatchSummary> {
        let input_dir = input_dir.as_ref();
        info!("Processing directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(VersetError::Config(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_dir.to_path_buf(),
        };
        fs::create_dir_all(&output_dir).await?;

        let mut transcript_files: Vec<PathBuf> = WalkDir::new(input_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            })
            .collect();
        transcript_files.sort();

        info!("Found {} transcript files to process", transcript_files.len());

        let pb = ProgressBar::new(transcript_files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut summary = BatchSummary::default();
        for transcript_path in &transcript_files {
            let relative = pathdiff::diff_paths(transcript_path, input_dir)
                .unwrap_or_else(|| PathBuf::from(transcript_path.file_name().unwrap_or_default()));
            let srt_path = output_dir.join(relative).with_extension("srt");
            pb.set_message(transcript_path.display().to_string());

            match self.generate_captions(transcript_path, &srt_path, format, None).await {
                Ok(captions) => {
                    summary.processed += 1;
                    info!("Successfully processed: {} ({} captions)", transcript_path.display(), captions.len());
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!("Failed to process {}: {}", transcript_path.display(), e);
                }
            }
            pb.inc(1);
        }
        pb.finish_with_message("done");

        info!("Batch finished: {} processed, {} failed", summary.processed, summary.failed);
        Ok(summary)
    }

    /// Place the source text's quoted verses on an SRT track, write the
    /// quote-corrected track and the verse metadata
    pub async fn align_verses<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>, S: AsRef<Path>>(
        &self,
        source_path: P,
        srt_path: Q,
        output_srt: R,
        metadata_path: S,
    ) -> Result<AlignmentExport> {
        let source = read_source(source_path.as_ref()).await?;
        let mut captions = read_srt(srt_path).await?;
        info!("{} captions loaded", captions.len());

        let linked = link_verses(&source, &mut captions, &self.config)?;

        write_srt(&captions, output_srt).await?;
        let export = AlignmentExport::new(linked.entries);
        export.save(metadata_path).await?;

        Ok(export)
    }

    /// Quoted verses of a source text with their citations
    pub async fn list_references<P: AsRef<Path>>(&self, source_path: P) -> Result<Vec<QuotedReference>> {
        let source = read_source(source_path.as_ref()).await?;
        let parser = ReferenceParser::new(&self.config.scripture);

        Ok(QuoteDetector::new(&self.config.scripture)
            .detect(&source)
            .into_iter()
            .map(|verse| QuotedReference {
                reference: parser.reference_for(&source, verse.source_position),
                verse,
            })
            .collect())
    }

    /// Delay an SRT track by `delay` seconds
    pub async fn shift_subtitles<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        delay: f64,
    ) -> Result<usize> {
        let captions = shift_captions(read_srt(input_path).await?, delay);
        info!("Shifted {} captions by {:.2}s", captions.len(), delay);
        write_srt(&captions, output_path).await?;
        Ok(captions.len())
    }

    /// Push captions back after each prayer transition. Returns the
    /// transition points, in seconds on the original timeline.
    pub async fn insert_pauses<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        pause_ms: Option<u64>,
    ) -> Result<Vec<f64>> {
        let captions = read_srt(input_path).await?;
        let detector = TransitionDetector::new(&self.config.pauses)?;
        let points = detector.detect_transitions(&captions);

        let pause = pause_ms.unwrap_or(self.config.pauses.pause_ms) as f64 / 1000.0;
        let captions = apply_pauses(captions, &points, pause);
        write_srt(&captions, output_path).await?;

        info!("Inserted {} pause(s) of {:.1}s", points.len(), pause);
        Ok(points)
    }
}

async fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(VersetError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENAI_JSON: &str = r#"{
        "text": "Bonjour à tous. Maintenant prions ensemble.",
        "language": "french",
        "segments": [
            {"id": 0, "start": 0.0, "end": 1.5, "text": " Bonjour à tous."},
            {"id": 1, "start": 2.0, "end": 4.0, "text": " Maintenant prions ensemble."}
        ]
    }"#;

    fn workflow() -> Workflow {
        Workflow::new(Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_captions_writes_srt() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sermon.json");
        let output = dir.path().join("sermon.srt");
        fs::write(&input, OPENAI_JSON).await.unwrap();

        let captions = workflow()
            .generate_captions(&input, &output, TranscriptFormat::OpenAI, Some(5.0))
            .await
            .unwrap();

        assert_eq!(captions.len(), 2);
        let written = read_srt(&output).await.unwrap();
        assert_eq!(written[0].text, "Bonjour à tous.");
    }

    #[tokio::test]
    async fn test_process_directory_mirrors_layout() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        let output_dir = dir.path().join("out");
        fs::create_dir_all(input_dir.join("dimanche")).await.unwrap();
        fs::write(input_dir.join("dimanche").join("culte.json"), OPENAI_JSON).await.unwrap();
        fs::write(input_dir.join("broken.json"), "{").await.unwrap();
        fs::write(input_dir.join("notes.txt"), "rien").await.unwrap();

        let summary = workflow()
            .process_directory(&input_dir, Some(&output_dir), TranscriptFormat::OpenAI)
            .await
            .unwrap();

        assert_eq!(summary, BatchSummary { processed: 1, failed: 1 });
        assert!(output_dir.join("dimanche").join("culte.srt").exists());
    }

    #[tokio::test]
    async fn test_insert_pauses_and_shift() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.srt");
        let paused = dir.path().join("paused.srt");
        let shifted = dir.path().join("shifted.srt");
        let captions = vec![
            Caption::new(1, 0.0, 2.0, "Maintenant prions ensemble."),
            Caption::new(2, 2.5, 4.0, "Seigneur, nous te louons."),
        ];
        write_srt(&captions, &input).await.unwrap();

        let points = workflow().insert_pauses(&input, &paused, Some(1000)).await.unwrap();
        assert_eq!(points, vec![2.0]);
        let moved = read_srt(&paused).await.unwrap();
        assert_eq!(moved[1].start_ms(), 3500);

        workflow().shift_subtitles(&paused, &shifted, 2.0).await.unwrap();
        let moved = read_srt(&shifted).await.unwrap();
        assert_eq!(moved[0].start_ms(), 2000);
    }

    #[tokio::test]
    async fn test_missing_source_is_reported() {
        let result = workflow().list_references("/nonexistent/sermon.txt").await;
        assert!(matches!(result, Err(VersetError::FileNotFound(_))));
    }
}
