//! Batch processing command for multiple purchase-order files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use pox_core::models::config::PdfConfig;
use pox_core::{ExtractionOutcome, ExtractionResult, PurchaseOrderParser};

use super::process::{format_order, OutputFormat};
use super::{is_image, is_supported_input, load_config, read_document_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
    processed_at: DateTime<Local>,
}

impl ProcessResult {
    fn status(&self) -> &'static str {
        match &self.extraction {
            Some(result) if result.order.outcome() == ExtractionOutcome::Complete => "complete",
            Some(_) => "partial",
            None => "error",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.inputs.join(" "));
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = Arc::new(PurchaseOrderParser::from_config(&config.extraction)?);
    let pdf_config = Arc::new(config.pdf.clone());
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));

    // Spawned up front, awaited in input order
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            let parser = Arc::clone(&parser);
            let pdf_config = Arc::clone(&pdf_config);
            let semaphore = Arc::clone(&semaphore);

            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                let result = tokio::task::spawn_blocking(move || {
                    process_single_file(path, &parser, &pdf_config)
                })
                .await?;
                anyhow::Ok(result)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await??;
        overall_pb.inc(1);

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                overall_pb.abandon();
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }

        results.push(result);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(extraction) = &result.extraction else {
                continue;
            };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("purchase_order");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            let content = format_order(&extraction.order, args.format, &config.sheet.sheet_name)?;
            fs::write(&output_path, content)?;
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
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let count = |status: &str| results.iter().filter(|r| r.status() == status).count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} complete, {} partial, {} failed",
        style(count("complete")).green(),
        style(count("partial")).yellow(),
        style(count("error")).red()
    );

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Expand each input as a glob pattern, keeping supported files in order
/// and dropping duplicates. Images are skipped with a warning.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        for path in glob(input)?.filter_map(|r| r.ok()) {
            if !path.is_file() || files.contains(&path) {
                continue;
            }

            if is_image(&path) {
                warn!("Skipping {}: run OCR on images first", path.display());
            } else if is_supported_input(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn process_single_file(
    path: PathBuf,
    parser: &PurchaseOrderParser,
    pdf_config: &PdfConfig,
) -> ProcessResult {
    let file_start = Instant::now();

    let (extraction, error) = match read_document_text(&path, pdf_config) {
        Ok(text) => (Some(parser.parse(&text)), None),
        Err(e) => (None, Some(e.to_string())),
    };

    ProcessResult {
        path,
        extraction,
        error,
        processing_time_ms: file_start.elapsed().as_millis() as u64,
        processed_at: Local::now(),
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "po_number",
        "item_count",
        "strategy",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let (po_number, item_count, strategy) = match &result.extraction {
            Some(extraction) => (
                extraction.order.po_number.clone(),
                extraction.order.items.len().to_string(),
                extraction
                    .strategy
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            ),
            None => Default::default(),
        };

        wtr.write_record([
            filename,
            result.status(),
            &po_number,
            &item_count,
            &strategy,
            &result.processing_time_ms.to_string(),
            &result.processed_at.to_rfc3339(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_inputs_skips_images_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.pdf", "c.png", "notes.md"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let pattern = dir.path().join("*").display().to_string();
        let explicit = dir.path().join("a.txt").display().to_string();
        let files = expand_inputs(&[explicit, pattern]).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.pdf"]);
    }

    #[test]
    fn test_status() {
        let parser = PurchaseOrderParser::new();
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("po.txt");
        fs::write(&path, "1   ABC-001   Steel Bolt M6   10   5.000   0   50.000").unwrap();
        let complete = process_single_file(path, &parser, &PdfConfig::default());
        assert_eq!(complete.status(), "complete");

        let path = dir.path().join("partial.txt");
        fs::write(&path, "PO Number: PO-2024-0117").unwrap();
        let partial = process_single_file(path, &parser, &PdfConfig::default());
        assert_eq!(partial.status(), "partial");

        let missing = process_single_file(dir.path().join("missing.txt"), &parser, &PdfConfig::default());
        assert_eq!(missing.status(), "error");
        assert!(missing.error.is_some());
    }
}
