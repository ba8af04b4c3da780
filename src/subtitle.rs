use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{Result, VersetError};

static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})$")
        .expect("valid SRT timing regex")
});

/// A timed subtitle unit, times in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// 1-based position in the track
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Caption {
    pub fn new(index: usize, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn start_ms(&self) -> u64 {
        seconds_to_ms(self.start)
    }

    pub fn end_ms(&self) -> u64 {
        seconds_to_ms(self.end)
    }
}

/// Drop captions without text and number the rest from 1
pub fn renumber(captions: Vec<Caption>) -> Vec<Caption> {
    captions
        .into_iter()
        .filter(|c| !c.text.trim().is_empty())
        .enumerate()
        .map(|(i, mut c)| {
            c.index = i + 1;
            c
        })
        .collect()
}

/// Render captions as SRT, keeping each caption's own index
pub fn format_srt(captions: &[Caption]) -> String {
    let mut srt_content = String::new();

    for caption in captions {
        srt_content.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            caption.index,
            format_srt_time(caption.start),
            format_srt_time(caption.end),
            caption.text.trim()
        ));
    }

    srt_content
}

/// Parse SRT content. Malformed blocks are skipped, the rest is kept.
pub fn parse_srt(content: &str) -> Vec<Caption> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut captions = Vec::new();
    let mut skipped = 0;

    // Blocks end on any line that is blank once trimmed
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    for block in blocks {
        match parse_block(&block) {
            Ok(caption) => captions.push(caption),
            Err(e) => {
                skipped += 1;
                warn!("Skipping malformed subtitle block: {}", e);
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} malformed subtitle block(s)", skipped);
    }
    debug!("Parsed {} subtitle block(s)", captions.len());
    captions
}

fn parse_block(block: &[&str]) -> Result<Caption> {
    let mut lines = block.iter().copied();

    let index_line = lines
        .next()
        .ok_or_else(|| VersetError::Subtitle("empty block".to_string()))?;
    let index = index_line
        .trim()
        .parse::<usize>()
        .map_err(|_| VersetError::Subtitle(format!("invalid index '{}'", index_line)))?;

    let timing_line = lines
        .next()
        .ok_or_else(|| VersetError::Subtitle(format!("block {} has no timing line", index)))?;
    let caps = TIMING_LINE.captures(timing_line.trim()).ok_or_else(|| {
        VersetError::Subtitle(format!("block {} has invalid timing '{}'", index, timing_line))
    })?;

    let field = |i: usize| -> Result<u64> {
        caps[i]
            .parse::<u64>()
            .map_err(|_| VersetError::Subtitle(format!("block {} has invalid timing '{}'", index, timing_line)))
    };
    let start_ms = ((field(1)? * 60 + field(2)?) * 60 + field(3)?) * 1000 + field(4)?;
    let end_ms = ((field(5)? * 60 + field(6)?) * 60 + field(7)?) * 1000 + field(8)?;

    let text = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    Ok(Caption::new(index, ms_to_seconds(start_ms), ms_to_seconds(end_ms), text))
}

/// Generate SRT subtitle file from captions
pub async fn write_srt<P: AsRef<Path>>(captions: &[Caption], output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Generating SRT file: {}", output_path.display());

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(output_path, format_srt(captions)).await?;

    info!("SRT file generated successfully ({} captions)", captions.len());
    Ok(())
}

/// Read an SRT subtitle file
pub async fn read_srt<P: AsRef<Path>>(input_path: P) -> Result<Vec<Caption>> {
    let input_path = input_path.as_ref();
    if !input_path.exists() {
        return Err(VersetError::FileNotFound(input_path.display().to_string()));
    }
    let content = fs::read_to_string(input_path).await?;
    Ok(parse_srt(&content))
}

/// Delay every caption by `delay` seconds, never before zero
pub fn shift_captions(captions: Vec<Caption>, delay: f64) -> Vec<Caption> {
    captions
        .into_iter()
        .map(|mut c| {
            c.start = (c.start + delay).max(0.0);
            c.end = (c.end + delay).max(0.0);
            c
        })
        .collect()
}

pub fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

pub fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm)
pub fn format_srt_time(seconds: f64) -> String {
    format_timecode(seconds_to_ms(seconds))
}

/// Format milliseconds to SRT time format (HH:MM:SS,mmm)
pub fn format_timecode(total_milliseconds: u64) -> String {
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
