use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::expression::ResolvedTerms;

/// A ranked term returned by a [`SimilarityOracle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub term: String,
    pub score: f32,
}

impl Neighbor {
    pub fn new(term: impl Into<String>, score: f32) -> Self {
        Self {
            term: term.into(),
            score,
        }
    }
}

pub trait Vocabulary: Send + Sync {
    fn contains(&self, term: &str) -> bool;
}

pub trait SimilarityOracle: Send + Sync {
    /// Nearest terms to `sum(positive) - sum(negative)`, best first.
    fn most_similar(
        &self,
        positive: &[String],
        negative: &[String],
        top_n: usize,
    ) -> Result<Vec<Neighbor>, ModelError>;
}

/// Terms the vocabulary does not know, positive terms first.
pub fn missing_terms<V: Vocabulary + ?Sized>(vocabulary: &V, terms: &ResolvedTerms) -> Vec<String> {
    terms
        .iter()
        .filter(|term| !vocabulary.contains(term))
        .cloned()
        .collect()
}
