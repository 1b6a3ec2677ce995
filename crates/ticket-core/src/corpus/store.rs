//! File-backed storage for the dictionary, corrections and model snapshot.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{CorpusError, Result, TicketError};
use crate::models::config::TicketConfig;
use crate::models::receipt::{CorpusRecord, Correction};

use super::TrainingCorpus;

/// Locations of the files the categorization engine reads and writes.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    dictionary: PathBuf,
    corrections: PathBuf,
    model: PathBuf,
}

impl CorpusStore {
    /// Create a store over explicit file paths.
    pub fn new(
        dictionary: impl Into<PathBuf>,
        corrections: impl Into<PathBuf>,
        model: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dictionary: dictionary.into(),
            corrections: corrections.into(),
            model: model.into(),
        }
    }

    /// Create a store from the data section of a configuration.
    pub fn from_config(config: &TicketConfig) -> Self {
        Self::new(
            config.data_path(&config.data.dictionary),
            config.data_path(&config.data.corrections),
            config.data_path(&config.data.trained_model),
        )
    }

    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary
    }

    pub fn corrections_path(&self) -> &Path {
        &self.corrections
    }

    pub fn model_path(&self) -> &Path {
        &self.model
    }

    /// Load the category dictionary. Missing or malformed data is an error.
    pub async fn load_dictionary(&self) -> Result<Vec<CorpusRecord>> {
        let records = read_records(&self.dictionary).await?;
        debug!(
            "Loaded {} dictionary records from {}",
            records.len(),
            self.dictionary.display()
        );
        Ok(records)
    }

    /// Load the correction store, treating any failure as "no corrections".
    pub async fn load_corrections(&self) -> Vec<CorpusRecord> {
        match read_records(&self.corrections).await {
            Ok(records) => records,
            Err(TicketError::Corpus(CorpusError::MissingResource { .. })) => {
                debug!("No correction store at {}", self.corrections.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable correction store: {}", e);
                Vec::new()
            }
        }
    }

    /// Load the dictionary and all corrections into one training corpus.
    pub async fn merged_corpus(&self) -> Result<TrainingCorpus> {
        let dictionary = self.load_dictionary().await?;
        let corrections = self.load_corrections().await;
        Ok(TrainingCorpus::merge(dictionary, corrections))
    }

    /// Distinct category labels of the merged corpus, in corpus order.
    pub async fn categories(&self) -> Result<Vec<String>> {
        let corpus = self.merged_corpus().await?;
        Ok(corpus.labels().map(str::to_string).collect())
    }

    /// Append one record per correction to the correction store.
    ///
    /// Records are not merged at write time; the next training pass folds
    /// them into their labels. Returns the number of stored records.
    pub async fn add_corrections(&self, corrections: &[Correction]) -> Result<usize> {
        let mut records = self.load_corrections().await;
        records.extend(corrections.iter().map(CorpusRecord::from));

        let content = serde_json::to_string(&records)?;
        write_file(&self.corrections, content)
            .await
            .map_err(|e| CorpusError::PersistenceFailure {
                path: self.corrections.clone(),
                reason: e.to_string(),
            })?;

        info!(
            "Added {} corrections to {} ({} records)",
            corrections.len(),
            self.corrections.display(),
            records.len()
        );
        Ok(records.len())
    }

    /// Read the persisted model snapshot, `None` if there is none.
    pub async fn read_model(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.model).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the model snapshot, creating the data directory if needed.
    pub async fn write_model(&self, content: String) -> std::io::Result<()> {
        write_file(&self.model, content).await
    }

    /// Delete the persisted model snapshot. No-op when absent.
    pub async fn remove_model(&self) -> Result<()> {
        match fs::remove_file(&self.model).await {
            Ok(()) => {
                debug!("Removed model snapshot {}", self.model.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn read_records(path: &Path) -> Result<Vec<CorpusRecord>> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            TicketError::from(CorpusError::MissingResource {
                path: path.to_path_buf(),
            })
        } else {
            TicketError::from(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        CorpusError::MalformedData {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

async fn write_file(path: &Path, content: String) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content).await
}
