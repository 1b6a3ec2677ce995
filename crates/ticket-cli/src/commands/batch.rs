//! Batch processing command for multiple receipt files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use ticket_core::{ReceiptAnalysis, ReceiptService};

use super::process::{format_analysis, open_service, read_input, OutputFormat};
use super::GlobalOptions;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    analysis: Option<ReceiptAnalysis>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let start = Instant::now();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let service = open_service(options).await?;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} receipts")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        match process_single_file(&path, &service).await {
            Ok(analysis) => results.push(ProcessResult {
                path,
                analysis: Some(analysis),
                error: None,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        analysis: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_with_message("Complete");

    // Write outputs
    for result in &results {
        if let (Some(analysis), Some(output_dir)) = (&result.analysis, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("receipt");

            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));
            fs::write(&output_path, format_analysis(analysis, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    if failed > 0 {
        eprintln!("{} {} files failed", style("✗").red(), failed);
    }

    if args.output_dir.is_none() {
        let analyses: Vec<_> = results
            .iter()
            .filter_map(|r| {
                r.analysis.as_ref().map(|analysis| {
                    serde_json::json!({
                        "file": r.path.display().to_string(),
                        "items": analysis.items,
                        "value": analysis.value,
                    })
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&analyses)?);
    }

    Ok(())
}

async fn process_single_file(path: &Path, service: &ReceiptService) -> anyhow::Result<ReceiptAnalysis> {
    let text = read_input(path)?;
    Ok(service.analyze(&text).await)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "status", "total", "items", "error"])?;

    for result in results {
        let file = result.path.display().to_string();
        match (&result.analysis, &result.error) {
            (Some(analysis), _) => {
                let total = if analysis.has_total() {
                    format!("{:.2}", analysis.value)
                } else {
                    String::new()
                };
                let items = analysis.items.len().to_string();
                wtr.write_record([file.as_str(), "ok", total.as_str(), items.as_str(), ""])?;
            }
            (None, error) => {
                wtr.write_record([
                    file.as_str(),
                    "failed",
                    "",
                    "",
                    error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
