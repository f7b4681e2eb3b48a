use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

use thumbforge::coordinator::{BatchOptions, run_batch};
use thumbforge::provider::{ImageProvider, ThumbnailProvider};
use thumbforge::scanner;
use thumbforge::types::{BatchResult, ExtractionMode, SizeRange};

#[derive(Parser)]
#[command(name = "thumbforge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Adaptive-size parallel thumbnail extraction for directories")]
struct Cli {
    /// Directory whose regular files get thumbnails.
    dir: PathBuf,

    /// Re-render every thumbnail even when a cached one exists.
    #[arg(long)]
    force: bool,

    /// Worker thread count (defaults to the CPU count).
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Thumbnail cache directory (defaults to DIR/.thumbforge).
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Emit the batch result as JSON instead of the styled report.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let running = Arc::new(AtomicBool::new(true));
    let cancel_flag = Arc::clone(&running);
    ctrlc::set_handler(move || cancel_flag.store(false, Ordering::Release))
        .context("Failed to register Ctrl-C handler")?;

    let scan = scanner::scan(&cli.dir).with_context(|| format!("Failed to scan {:?}", cli.dir))?;

    if !cli.json {
        println!(
            "Scanned {} files (sizes {} - {} bytes)",
            style(scan.entries.len()).cyan(),
            scan.range.min,
            scan.range.max
        );
    }

    let cache_dir = cli
        .cache_dir
        .unwrap_or_else(|| cli.dir.join(".thumbforge"));
    let provider = ImageProvider::new(cache_dir);
    provider
        .initialize()
        .context("Failed to initialize thumbnail provider")?;

    let options = BatchOptions {
        mode: if cli.force {
            ExtractionMode::ForceFullExtraction
        } else {
            ExtractionMode::Default
        },
        workers: cli.jobs.unwrap_or(0),
    };

    let pb = ProgressBar::new(scan.entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")?
            .progress_chars("=>-"),
    );
    let progress_cb = |current: usize, _total: usize| pb.set_position(current as u64);

    let batch = run_batch(
        &scan.entries,
        scan.range,
        options,
        &provider,
        &running,
        Some(&progress_cb),
    );
    pb.finish_and_clear();
    provider.shutdown();

    let cancelled = !running.load(Ordering::Acquire);

    if cli.json {
        let report = json_report(scan.range, cancelled, &batch);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for failure in &batch.failures {
        println!(
            "[!] {}: {}",
            style(failure.path.display()).yellow(),
            failure.error
        );
    }

    if cancelled {
        println!("{}", style("Cancelled - partial results.").yellow());
    }

    println!(
        "Successfully extracted {} of {} thumbnails ({} skipped as unsupported)",
        style(batch.succeeded).green().bold(),
        batch.processed(),
        batch.suppressed
    );

    Ok(())
}

fn json_report(range: SizeRange, cancelled: bool, batch: &BatchResult) -> serde_json::Value {
    serde_json::json!({
        "range": range,
        "cancelled": cancelled,
        "batch": batch,
    })
}
