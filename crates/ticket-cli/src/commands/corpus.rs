//! Corpus commands - list categories, retrain and record corrections.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use ticket_core::{CorpusStore, Correction, ModelSource};

use super::process::open_service;
use super::GlobalOptions;

/// Arguments for the correct command.
#[derive(Args)]
pub struct CorrectArgs {
    /// Correct category label
    #[arg(required_unless_present = "file", requires = "name")]
    label: Option<String>,

    /// Item name as printed by `ticket items`
    name: Option<String>,

    /// JSON file with a list of {"label", "name"} corrections
    #[arg(short, long, conflicts_with = "label")]
    file: Option<PathBuf>,

    /// Retrain right after storing the corrections
    #[arg(long)]
    retrain: bool,
}

pub async fn categories(options: &GlobalOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let store = CorpusStore::from_config(&config);

    for category in store.categories().await? {
        println!("{}", category);
    }
    Ok(())
}

pub async fn retrain(options: &GlobalOptions) -> anyhow::Result<()> {
    let service = open_service(options).await?;
    service.force_retrain().await?;

    let labels = service.categorizer().labels().await;
    eprintln!(
        "{} Retrained model with {} categories",
        style("✓").green(),
        labels.len()
    );
    Ok(())
}

pub async fn correct(args: CorrectArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let corrections: Vec<Correction> = match (&args.file, args.label, args.name) {
        (Some(path), _, _) => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Invalid corrections file {}: {}", path.display(), e)
            })?
        }
        (None, Some(label), Some(name)) => vec![Correction::new(label, name)],
        _ => anyhow::bail!("Provide a label and a name, or --file"),
    };

    if corrections.is_empty() {
        anyhow::bail!("No corrections to add");
    }

    let config = options.load_config()?;
    let store = CorpusStore::from_config(&config);
    let stored = store.add_corrections(&corrections).await?;

    eprintln!(
        "{} Added {} corrections ({} stored)",
        style("✓").green(),
        corrections.len(),
        stored
    );

    if args.retrain {
        let service = open_service(options).await?;
        // without a snapshot, opening already trained on the stored corrections
        match service.categorizer().source().await {
            ModelSource::Trained => eprintln!("{} Trained model", style("✓").green()),
            ModelSource::Loaded => {
                service.force_retrain().await?;
                eprintln!("{} Retrained model", style("✓").green());
            }
        }
    }

    Ok(())
}
