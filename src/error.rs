use thiserror::Error;

/// Failures while resolving an expression into term lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Mismatched parentheses")]
    MismatchedParentheses,
    #[error("Unexpected closing parenthesis")]
    UnexpectedClosingParenthesis,
}

/// Failure reported by a caller-supplied vector model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ModelError {
    pub message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SemarithError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Error: {0}")]
    Model(#[from] ModelError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
