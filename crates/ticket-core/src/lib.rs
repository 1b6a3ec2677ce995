//! Core library for grocery receipt interpretation.
//!
//! This crate provides:
//! - Total amount extraction from raw OCR text
//! - Noise filtering that turns receipt lines into candidate product names
//! - A naive Bayes category classifier trained from a category dictionary
//! - Correction storage and merging so the classifier adapts over time

pub mod error;
pub mod models;
pub mod receipt;
pub mod corpus;
pub mod classifier;
pub mod service;

pub use error::{CorpusError, ModelError, Result, TicketError};
pub use models::config::TicketConfig;
pub use models::receipt::{ClassificationResult, CorpusRecord, Correction, ReceiptAnalysis};
pub use receipt::{extract_candidates, extract_total, CandidateExtractor};
pub use corpus::{CorpusStore, TrainingCorpus};
pub use classifier::{Categorizer, ModelSource, NaiveBayes};
pub use service::ReceiptService;
