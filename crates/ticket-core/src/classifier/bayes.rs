//! Multinomial naive Bayes text classifier over a bag of words.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::corpus::TrainingCorpus;
use crate::error::ModelError;

/// Snapshot format version; snapshots of another version are retrained.
const SNAPSHOT_VERSION: u32 = 1;

/// Laplace smoothing added to every token count.
const DEFAULT_SMOOTHING: f64 = 1.0;

/// Word statistics gathered for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LabelStats {
    label: String,
    documents: u64,
    token_total: u64,
    tokens: BTreeMap<String, u64>,
}

impl LabelStats {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            documents: 0,
            token_total: 0,
            tokens: BTreeMap::new(),
        }
    }
}

/// Trained naive Bayes classifier.
///
/// Labels keep corpus order; equal scores resolve to the earlier label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayes {
    version: u32,
    smoothing: f64,
    documents: u64,
    vocabulary: BTreeSet<String>,
    labels: Vec<LabelStats>,
}

impl NaiveBayes {
    /// Train on every `(exemplar, label)` pair of the corpus.
    ///
    /// Labels without exemplars cannot be predicted and are left out.
    pub fn train(corpus: &TrainingCorpus) -> Result<Self, ModelError> {
        let mut vocabulary = BTreeSet::new();
        let mut labels = Vec::with_capacity(corpus.len());
        let mut documents = 0;

        for record in corpus.records() {
            if record.value.is_empty() {
                continue;
            }

            let mut stats = LabelStats::new(&record.key);
            for exemplar in &record.value {
                stats.documents += 1;
                for token in tokenize(exemplar) {
                    stats.token_total += 1;
                    *stats.tokens.entry(token.clone()).or_insert(0) += 1;
                    vocabulary.insert(token);
                }
            }
            documents += stats.documents;
            labels.push(stats);
        }

        if labels.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }

        Ok(Self {
            version: SNAPSHOT_VERSION,
            smoothing: DEFAULT_SMOOTHING,
            documents,
            vocabulary,
            labels,
        })
    }

    /// Most probable label for `text`.
    pub fn classify(&self, text: &str) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (label, score) in self.scores(text) {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((label, score)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Log posterior (up to a constant) of every label, in corpus order.
    ///
    /// Tokens outside the training vocabulary do not contribute.
    pub fn scores(&self, text: &str) -> Vec<(&str, f64)> {
        let tokens: Vec<String> = tokenize(text)
            .filter(|t| self.vocabulary.contains(t))
            .collect();
        let vocabulary_size = self.vocabulary.len() as f64;

        self.labels
            .iter()
            .map(|stats| {
                let prior = (stats.documents as f64 / self.documents as f64).ln();
                let denominator = stats.token_total as f64 + self.smoothing * vocabulary_size;
                let likelihood: f64 = tokens
                    .iter()
                    .map(|token| {
                        let count = stats.tokens.get(token).copied().unwrap_or(0) as f64;
                        ((count + self.smoothing) / denominator).ln()
                    })
                    .sum();
                (stats.label.as_str(), prior + likelihood)
            })
            .collect()
    }

    /// Labels the classifier can predict, in corpus order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.label.as_str())
    }

    /// Number of training documents.
    pub fn document_count(&self) -> u64 {
        self.documents
    }

    /// Number of distinct training tokens.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Serialize the trained state.
    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string(self).map_err(|e| ModelError::MalformedSnapshot(e.to_string()))
    }

    /// Restore a trained state written by [`NaiveBayes::to_json`].
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self =
            serde_json::from_str(json).map_err(|e| ModelError::MalformedSnapshot(e.to_string()))?;

        if model.version != SNAPSHOT_VERSION {
            return Err(ModelError::MalformedSnapshot(format!(
                "unsupported snapshot version {}",
                model.version
            )));
        }
        if model.labels.is_empty() || model.documents == 0 {
            return Err(ModelError::MalformedSnapshot("snapshot has no labels".to_string()));
        }

        Ok(model)
    }
}

/// Split text into lowercase alphanumeric words.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
