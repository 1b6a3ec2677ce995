//! Error types for the ticket-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the ticket library.
#[derive(Error, Debug)]
pub enum TicketError {
    /// Training corpus error.
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Categorization model error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the category dictionary and the correction store.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A required data file does not exist.
    #[error("missing resource: {}", path.display())]
    MissingResource { path: PathBuf },

    /// A data file exists but could not be parsed.
    #[error("malformed data in {}: {reason}", path.display())]
    MalformedData { path: PathBuf, reason: String },

    /// Writing a data file failed.
    #[error("failed to write {}: {reason}", path.display())]
    PersistenceFailure { path: PathBuf, reason: String },
}

/// Errors related to the categorization model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The training corpus holds no labelled exemplars.
    #[error("training corpus is empty")]
    EmptyCorpus,

    /// The persisted snapshot could not be read back.
    #[error("malformed model snapshot: {0}")]
    MalformedSnapshot(String),

    /// Writing the trained model failed.
    #[error("failed to persist model to {}: {reason}", path.display())]
    PersistenceFailure { path: PathBuf, reason: String },
}

/// Result type for the ticket library.
pub type Result<T> = std::result::Result<T, TicketError>;
