//! Verset - caption timing and scripture alignment for sermon recordings
//!
//! Entry point of the `verset` command line tool: builds caption tracks from
//! recognizer output and places quoted Bible verses on them.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use verset::cli::{Args, Commands};
use verset::config::Config;
use verset::transcript::TranscriptFormat;
use verset::workflow::Workflow;

const DEFAULT_CONFIG_FILE: &str = "verset.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Config::from_file(DEFAULT_CONFIG_FILE)?
            } else {
                Config::default()
            }
        }
    };

    let workflow = Workflow::new(config)?;

    match args.command {
        Commands::Captions { input, output, format, audio_duration } => {
            let format = parse_format(&format)?;
            let captions = workflow.generate_captions(&input, &output, format, audio_duration).await?;
            info!("Wrote {} captions to {}", captions.len(), output.display());
        }
        Commands::Batch { input_dir, output_dir, format } => {
            let format = parse_format(&format)?;
            let summary = workflow.process_directory(&input_dir, output_dir, format).await?;
            println!("Processed: {}, failed: {}", summary.processed, summary.failed);
        }
        Commands::Align { source, srt, output, metadata } => {
            let export = workflow.align_verses(&source, &srt, &output, &metadata).await?;
            println!("\n{} verse(s) aligned", export.total_verses);
            for entry in &export.bible_verses {
                println!("{:<24} {} --> {}", entry.reference, entry.start_time, entry.end_time);
            }
        }
        Commands::References { source } => {
            let references = workflow.list_references(&source).await?;
            if references.is_empty() {
                println!("No quoted verses found.");
            }
            for (i, item) in references.iter().enumerate() {
                println!("#{:<3} {:<24} {}", i + 1, item.reference, item.verse.preview(60));
            }
        }
        Commands::Shift { input, output, delay } => {
            let count = workflow.shift_subtitles(&input, &output, delay).await?;
            info!("Shifted {} captions into {}", count, output.display());
        }
        Commands::Pauses { input, output, pause_ms } => {
            let points = workflow.insert_pauses(&input, &output, pause_ms).await?;
            for point in &points {
                println!("Pause after {:.2}s", point);
            }
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".verset").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "verset.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Logging initialized - console: {}, file: {}",
        log_level,
        log_dir.join("verset.log").display()
    );

    Ok(())
}

/// Parse recognizer output format from string
fn parse_format(format: &str) -> Result<TranscriptFormat> {
    Ok(format.parse::<TranscriptFormat>()?)
}
