//! Config command - inspect and create the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use ticket_core::{CorpusStore, TicketConfig};

use super::GlobalOptions;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default settings
    Init(InitArgs),

    /// Show the configuration file and the data files it points to
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(options),
        ConfigCommand::Init(init_args) => init_config(init_args, options),
        ConfigCommand::Path => show_paths(options),
    }
}

/// Configuration in effect, falling back to defaults when no file exists yet.
fn effective_config(options: &GlobalOptions) -> anyhow::Result<TicketConfig> {
    if options.config_path().exists() {
        return options.load_config();
    }

    eprintln!(
        "{} No config file found, using defaults.",
        style("ℹ").blue()
    );
    Ok(match &options.data_dir {
        Some(dir) => TicketConfig::default().with_data_dir(dir),
        None => TicketConfig::default(),
    })
}

fn show_config(options: &GlobalOptions) -> anyhow::Result<()> {
    let config = effective_config(options)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(args: InitArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| options.config_path());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // --data-dir is recorded so later runs do not need it
    let config = match &options.data_dir {
        Some(dir) => TicketConfig::default().with_data_dir(dir),
        None => TicketConfig::default(),
    };
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );
    println!("  Data directory: {}", config.data.data_dir.display());

    Ok(())
}

fn show_paths(options: &GlobalOptions) -> anyhow::Result<()> {
    let config_path = options.config_path();
    print_path("Configuration file", &config_path);

    let config = effective_config(options)?;
    let store = CorpusStore::from_config(&config);
    print_path("Dictionary", store.dictionary_path());
    print_path("Corrections", store.corrections_path());
    print_path("Trained model", store.model_path());

    if !config_path.exists() {
        println!();
        println!("Run 'ticket config init' to create a configuration file.");
    }

    Ok(())
}

fn print_path(name: &str, path: &Path) {
    let status = if path.exists() {
        style("exists").green()
    } else {
        style("missing").yellow()
    };
    println!("{:<20} {} ({})", format!("{}:", name), path.display(), status);
}
