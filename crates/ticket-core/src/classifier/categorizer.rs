//! Initialized categorization model with load, train and persist lifecycle.

use std::time::Instant;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::corpus::CorpusStore;
use crate::error::{ModelError, Result};
use crate::models::receipt::ClassificationResult;

use super::NaiveBayes;

/// How the live model became ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Restored from the persisted snapshot.
    Loaded,
    /// Trained from the merged corpus.
    Trained,
}

struct ReadyModel {
    classifier: NaiveBayes,
    source: ModelSource,
}

/// Handle to a ready categorization model.
///
/// Only [`Categorizer::initialize`] creates one, so holding a handle means the
/// model is ready to classify.
pub struct Categorizer {
    store: CorpusStore,
    model: RwLock<ReadyModel>,
    retrain: Mutex<()>,
}

impl Categorizer {
    /// Load the persisted model, or train and persist one if it is missing or
    /// unreadable.
    ///
    /// Fails when training is needed and the dictionary cannot be loaded.
    pub async fn initialize(store: CorpusStore) -> Result<Self> {
        let ready = match load_snapshot(&store).await {
            Ok(Some(classifier)) => {
                info!(
                    "Loaded model from {} ({} labels)",
                    store.model_path().display(),
                    classifier.labels().count()
                );
                ReadyModel {
                    classifier,
                    source: ModelSource::Loaded,
                }
            }
            Ok(None) => {
                info!("No model snapshot found, training");
                train_and_persist(&store).await?
            }
            Err(e) => {
                warn!("Could not load model snapshot, training again: {}", e);
                train_and_persist(&store).await?
            }
        };

        Ok(Self {
            store,
            model: RwLock::new(ready),
            retrain: Mutex::new(()),
        })
    }

    /// Predict the category of one candidate item.
    pub async fn classify(&self, item: &str) -> String {
        let model = self.model.read().await;
        predict(&model.classifier, item)
    }

    /// Classify candidate items, numbering results from 0 in input order.
    pub async fn classify_batch<I, S>(&self, items: I) -> Vec<ClassificationResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = self.model.read().await;
        items
            .into_iter()
            .enumerate()
            .map(|(id, item)| {
                let name = item.into();
                let label = predict(&model.classifier, &name);
                debug!("Item {} {:?} -> {}", id, name, label);
                ClassificationResult { id, name, label }
            })
            .collect()
    }

    /// Discard the persisted model and retrain from the current corpus.
    ///
    /// Overlapping calls run one after another. If training fails the previous
    /// in-memory model stays live.
    pub async fn force_retrain(&self) -> Result<()> {
        let _guard = self.retrain.lock().await;

        self.store.remove_model().await?;
        let ready = train_and_persist(&self.store).await?;
        *self.model.write().await = ready;

        info!("Retrained model");
        Ok(())
    }

    /// How the current model became ready.
    pub async fn source(&self) -> ModelSource {
        self.model.read().await.source
    }

    /// Labels the model can predict, in corpus order.
    pub async fn labels(&self) -> Vec<String> {
        let model = self.model.read().await;
        model.classifier.labels().map(str::to_string).collect()
    }

    /// Backing files.
    pub fn store(&self) -> &CorpusStore {
        &self.store
    }
}

// A trained classifier always has at least one label.
fn predict(classifier: &NaiveBayes, item: &str) -> String {
    classifier.classify(item).map(str::to_string).unwrap_or_default()
}

async fn load_snapshot(store: &CorpusStore) -> Result<Option<NaiveBayes>> {
    match store.read_model().await? {
        Some(json) => Ok(Some(NaiveBayes::from_json(&json)?)),
        None => Ok(None),
    }
}

async fn train_and_persist(store: &CorpusStore) -> Result<ReadyModel> {
    let start = Instant::now();
    let corpus = store.merged_corpus().await?;

    info!(
        "Training on {} exemplars in {} categories",
        corpus.document_count(),
        corpus.len()
    );
    let classifier = NaiveBayes::train(&corpus)?;
    debug!(
        "Trained in {}ms, vocabulary of {} words",
        start.elapsed().as_millis(),
        classifier.vocabulary_size()
    );

    if let Err(e) = persist(store, &classifier).await {
        warn!("{}", e);
    }

    Ok(ReadyModel {
        classifier,
        source: ModelSource::Trained,
    })
}

async fn persist(store: &CorpusStore, classifier: &NaiveBayes) -> std::result::Result<(), ModelError> {
    let json = classifier.to_json()?;
    store
        .write_model(json)
        .await
        .map_err(|e| ModelError::PersistenceFailure {
            path: store.model_path().to_path_buf(),
            reason: e.to_string(),
        })?;
    debug!("Saved model to {}", store.model_path().display());
    Ok(())
}
