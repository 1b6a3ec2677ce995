//! Category classification of candidate items.

mod bayes;
mod categorizer;

pub use bayes::{tokenize, NaiveBayes};
pub use categorizer::{Categorizer, ModelSource};
