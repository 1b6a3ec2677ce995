//! Single receipt commands - total, items, classify and analyze.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use ticket_core::receipt::{extract_total, CandidateExtractor};
use ticket_core::{ClassificationResult, ReceiptAnalysis, ReceiptService};

use super::GlobalOptions;

/// Arguments for commands reading one receipt.
#[derive(Args)]
pub struct InputArgs {
    /// OCR text file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,
}

/// Arguments for commands producing structured output.
#[derive(Args)]
pub struct ProcessArgs {
    /// OCR text file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn total(args: InputArgs) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    println!("{}", extract_total(&text));
    Ok(())
}

pub fn items(args: InputArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let text = read_input(&args.input)?;

    let extractor = CandidateExtractor::new().with_min_line_length(config.parser.min_line_length);
    for item in extractor.candidates(&text) {
        println!("{}", item);
    }
    Ok(())
}

pub async fn classify(args: ProcessArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    let service = open_service(options).await?;

    let items = service.classify(&text).await;
    let content = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&items)?,
        OutputFormat::Csv => format_items_csv(&items, None)?,
        OutputFormat::Text => format_items_text(&items),
    };

    write_output(args.output.as_deref(), &content)
}

pub async fn analyze(args: ProcessArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    let service = open_service(options).await?;

    let analysis = service.analyze(&text).await;
    let content = format_analysis(&analysis, args.format)?;

    write_output(args.output.as_deref(), &content)
}

/// Initialize the receipt service, training the model if needed.
pub async fn open_service(options: &GlobalOptions) -> anyhow::Result<ReceiptService> {
    let start = Instant::now();
    let config = options.load_config()?;

    let service = ReceiptService::open(&config).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to initialize the categorizer from {}: {}",
            config.data.data_dir.display(),
            e
        )
    })?;

    info!("Categorizer ready in {:?}", start.elapsed());
    Ok(service)
}

pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    debug!("Reading {}", path.display());
    Ok(fs::read_to_string(path)?)
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}

pub fn format_analysis(analysis: &ReceiptAnalysis, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
        OutputFormat::Csv => format_items_csv(&analysis.items, Some(analysis.value)),
        OutputFormat::Text => {
            let mut output = String::new();
            if analysis.has_total() {
                output.push_str(&format!("Total: {:.2}\n", analysis.value));
            } else {
                output.push_str("Total: not found\n");
            }
            output.push('\n');
            output.push_str(&format_items_text(&analysis.items));
            Ok(output)
        }
    }
}

fn format_items_csv(items: &[ClassificationResult], total: Option<f64>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Write header
    match total {
        Some(_) => wtr.write_record(["id", "name", "label", "receipt_total"])?,
        None => wtr.write_record(["id", "name", "label"])?,
    }

    // Write data
    for item in items {
        let id = item.id.to_string();
        match total {
            Some(total) => {
                wtr.write_record([&id, &item.name, &item.label, &total.to_string()])?
            }
            None => wtr.write_record([&id, &item.name, &item.label])?,
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_items_text(items: &[ClassificationResult]) -> String {
    if items.is_empty() {
        return "No items found\n".to_string();
    }

    let width = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(0);
    let mut output = String::from("Items:\n");
    for item in items {
        output.push_str(&format!(
            "  {:>3}  {:<width$}  {}\n",
            item.id,
            item.name,
            item.label,
            width = width
        ));
    }
    output
}
