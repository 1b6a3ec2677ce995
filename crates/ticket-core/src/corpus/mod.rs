//! Training corpus management: dictionary and correction merge, correction
//! persistence and category listing.

mod merge;
mod store;

pub use merge::TrainingCorpus;
pub use store::CorpusStore;
