//! Process command - extract a purchase order from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use pox_core::models::sheet::SHEET_COLUMNS;
use pox_core::{ExtractionOutcome, ExtractionResult, PurchaseOrder, PurchaseOrderParser};

use super::{load_config, read_document_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (text or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Worksheet name for sheet output (default: from config)
    #[arg(long)]
    sheet_name: Option<String>,

    /// Show which line-item strategy matched, and extraction warnings
    #[arg(long)]
    show_strategy: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
    /// Spreadsheet payload (JSON)
    Sheet,
}

impl OutputFormat {
    /// File extension for written outputs.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Sheet => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading document...");
    let text = read_document_text(&args.input, &config.pdf)?;

    pb.set_message("Extracting purchase order...");
    let parser = PurchaseOrderParser::from_config(&config.extraction)?;
    let result = parser.parse(&text);

    pb.finish_and_clear();

    let sheet_name = args.sheet_name.as_deref().unwrap_or(&config.sheet.sheet_name);
    let output = format_order(&result.order, args.format, sheet_name)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if result.order.outcome() == ExtractionOutcome::Partial {
        eprintln!(
            "{} No line items found; extraction is partial",
            style("⚠").yellow()
        );
    }

    if args.show_strategy {
        print_diagnostics(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_diagnostics(result: &ExtractionResult) {
    let strategy = result
        .strategy
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());

    eprintln!();
    eprintln!("{} Strategy: {}", style("ℹ").blue(), strategy);
    eprintln!(
        "{} Table region: {}",
        style("ℹ").blue(),
        if result.table_bounded { "bounded" } else { "full text" }
    );
    eprintln!(
        "{} Processing time: {}ms",
        style("ℹ").blue(),
        result.processing_time_ms
    );

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }
}

/// Render a purchase order in the requested format.
pub fn format_order(
    order: &PurchaseOrder,
    format: OutputFormat,
    sheet_name: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(order)?),
        OutputFormat::Csv => format_csv(order),
        OutputFormat::Text => Ok(format_text(order)),
        OutputFormat::Sheet => Ok(serde_json::to_string_pretty(
            &order.to_sheet_payload(sheet_name),
        )?),
    }
}

fn format_csv(order: &PurchaseOrder) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(
        SHEET_COLUMNS
            .iter()
            .copied()
            .chain(["no", "unit_price", "discount", "amount"]),
    )?;

    for (row, item) in order.to_sheet_rows().iter().zip(&order.items) {
        wtr.write_record(row.iter().map(String::as_str).chain([
            item.no.as_str(),
            item.unit_price.as_deref().unwrap_or(""),
            item.discount.as_deref().unwrap_or(""),
            item.amount.as_deref().unwrap_or(""),
        ]))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(order: &PurchaseOrder) -> String {
    let mut output = String::new();

    output.push_str(&format!("PO Number: {}\n", order.po_number));
    output.push_str(&format!("PO Date: {}\n", order.po_date));
    output.push_str(&format!("Supplier: {}\n", order.supplier));
    if !order.description.is_empty() {
        output.push_str(&format!("Description: {}\n", order.description));
    }
    output.push('\n');

    if order.items.is_empty() {
        output.push_str("No line items found\n");
        return output;
    }

    output.push_str(&format!("Items ({}):\n", order.items.len()));
    for item in &order.items {
        output.push_str(&format!(
            "  {:>3}. {:<12} {:<40} x{}\n",
            item.no, item.item_code, item.description, item.quantity
        ));
    }
    output.push_str(&format!("\nTotal quantity: {}\n", order.total_quantity()));

    output
}
