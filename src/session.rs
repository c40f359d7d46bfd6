use std::fmt;

use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{ModelError, SemarithError};
use crate::expression::{parse, ResolvedTerms};
use crate::model::{missing_terms, Neighbor, SimilarityOracle, Vocabulary};

/// Result of evaluating one expression against a model.
///
/// The resolved terms and the missing-term report are kept even when the
/// oracle fails, so the caller can still show them next to the error.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub terms: ResolvedTerms,
    pub missing: Vec<String>,
    pub neighbors: Result<Vec<Neighbor>, ModelError>,
}

impl Evaluation {
    pub fn is_ok(&self) -> bool {
        self.neighbors.is_ok()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Computing: {}", self.terms)?;
        if !self.missing.is_empty() {
            writeln!(f, "Some words not in vocab: {}", self.missing.join(", "))?;
        }
        match &self.neighbors {
            Ok(neighbors) => {
                write!(f, "Top results:")?;
                for (rank, neighbor) in neighbors.iter().enumerate() {
                    write!(f, "\n  {}. {:<20} {:.4}", rank + 1, neighbor.term, neighbor.score)?;
                }
                Ok(())
            }
            Err(e) => write!(f, "Error: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Exit,
    /// Blank input.
    Skip,
    NoTerms,
    Evaluated(Evaluation),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Exit => write!(f, "Goodbye!"),
            Outcome::Skip => Ok(()),
            Outcome::NoTerms => write!(f, "No valid words detected."),
            Outcome::Evaluated(evaluation) => write!(f, "{}", evaluation),
        }
    }
}

/// Evaluates single lines of user input against a vector model.
///
/// Reading input and looping are left to the caller; a session holds no
/// mutable state and can be shared.
pub struct Session<'m, M: ?Sized> {
    model: &'m M,
    config: SessionConfig,
}

impl<'m, M> Session<'m, M>
where
    M: Vocabulary + SimilarityOracle + ?Sized,
{
    pub fn new(model: &'m M) -> Self {
        Self::with_config(model, SessionConfig::default())
    }

    pub fn with_config(model: &'m M, config: SessionConfig) -> Self {
        Session { model, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn evaluate_line(&self, line: &str) -> Result<Outcome, SemarithError> {
        let line = line.trim();
        if self.config.is_exit_command(line) {
            return Ok(Outcome::Exit);
        }
        if line.is_empty() {
            return Ok(Outcome::Skip);
        }

        let terms = parse(line)?;
        if terms.is_empty() {
            return Ok(Outcome::NoTerms);
        }
        Ok(Outcome::Evaluated(self.evaluate(terms)))
    }

    /// Queries the model with already resolved terms.
    ///
    /// Unknown terms are reported but still passed on; the oracle decides
    /// whether it can rank them. An oracle failure lands in
    /// [`Evaluation::neighbors`] without discarding the report.
    pub fn evaluate(&self, terms: ResolvedTerms) -> Evaluation {
        let missing = missing_terms(self.model, &terms);
        if !missing.is_empty() {
            warn!(missing = ?missing, "terms not in vocabulary");
        }

        let neighbors = self
            .model
            .most_similar(&terms.positive, &terms.negative, self.config.top_n);
        match &neighbors {
            Ok(found) => debug!(
                positive = terms.positive.len(),
                negative = terms.negative.len(),
                neighbors = found.len(),
                "evaluated expression"
            ),
            Err(e) => warn!(error = %e, "similarity query failed"),
        }

        Evaluation {
            terms,
            missing,
            neighbors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_display() {
        let evaluation = Evaluation {
            terms: ResolvedTerms {
                positive: vec!["king".to_string(), "woman".to_string()],
                negative: vec!["man".to_string()],
            },
            missing: vec![],
            neighbors: Ok(vec![Neighbor::new("queen", 0.71182), Neighbor::new("monarch", 0.6)]),
        };
        assert_eq!(
            evaluation.to_string(),
            "Computing: [+king, +woman] [-man]\n\
             Top results:\n  \
             1. queen                0.7118\n  \
             2. monarch              0.6000"
        );
    }

    #[test]
    fn test_evaluation_display_with_missing() {
        let evaluation = Evaluation {
            terms: ResolvedTerms {
                positive: vec!["zorp".to_string()],
                negative: vec![],
            },
            missing: vec!["zorp".to_string()],
            neighbors: Ok(vec![]),
        };
        assert_eq!(
            evaluation.to_string(),
            "Computing: [+zorp]\nSome words not in vocab: zorp\nTop results:"
        );
    }

    #[test]
    fn test_evaluation_display_with_model_error() {
        let evaluation = Evaluation {
            terms: ResolvedTerms {
                positive: vec!["king".to_string()],
                negative: vec!["zorp".to_string()],
            },
            missing: vec!["zorp".to_string()],
            neighbors: Err(ModelError::new("Key 'zorp' not present")),
        };
        assert!(!evaluation.is_ok());
        assert_eq!(
            evaluation.to_string(),
            "Computing: [+king] [-zorp]\n\
             Some words not in vocab: zorp\n\
             Error: Key 'zorp' not present"
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Exit.to_string(), "Goodbye!");
        assert_eq!(Outcome::Skip.to_string(), "");
        assert_eq!(Outcome::NoTerms.to_string(), "No valid words detected.");
    }
}
