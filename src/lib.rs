//! Resolves signed word expressions such as `king - man + woman` or
//! `a - (b - (c - d))` into the terms to add and the terms to subtract,
//! ready to hand to a word-vector model.

pub mod config;
pub mod error;
pub mod expression;
pub mod model;
pub mod session;

pub use config::SessionConfig;
pub use error::{ModelError, ParseError, SemarithError};
pub use expression::{parse, tokenize, ResolvedTerms, Token};
pub use model::{Neighbor, SimilarityOracle, Vocabulary};
pub use session::{Evaluation, Outcome, Session};
