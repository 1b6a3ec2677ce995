//! CLI application for grocery receipt parsing and categorization.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, corpus, process};

/// Grocery receipt parser - Extract totals and categorized items from OCR text
#[derive(Parser)]
#[command(name = "ticket")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides the configured one)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the total amount of a receipt
    Total(process::InputArgs),

    /// List the candidate items of a receipt
    Items(process::InputArgs),

    /// Classify the items of a receipt
    Classify(process::ProcessArgs),

    /// Extract the total and classified items of a receipt
    Analyze(process::ProcessArgs),

    /// Analyze multiple receipt files
    Batch(batch::BatchArgs),

    /// List known categories
    Categories,

    /// Discard the trained model and train again
    Retrain,

    /// Record category corrections for future training
    Correct(corpus::CorrectArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let options = commands::GlobalOptions {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    // Execute command
    match cli.command {
        Commands::Total(args) => process::total(args),
        Commands::Items(args) => process::items(args, &options),
        Commands::Classify(args) => process::classify(args, &options).await,
        Commands::Analyze(args) => process::analyze(args, &options).await,
        Commands::Batch(args) => batch::run(args, &options).await,
        Commands::Categories => corpus::categories(&options).await,
        Commands::Retrain => corpus::retrain(&options).await,
        Commands::Correct(args) => corpus::correct(args, &options).await,
        Commands::Config(args) => config::run(args, &options).await,
    }
}
