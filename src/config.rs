use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::error::SemarithError;

lazy_static! {
    static ref DEFAULT_EXIT_COMMANDS: HashSet<String> = {
        vec!["exit", "quit", "q"].into_iter().map(String::from).collect()
    };
}

pub const DEFAULT_TOP_N: usize = 5;

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_exit_commands() -> Vec<String> {
    let mut commands: Vec<String> = DEFAULT_EXIT_COMMANDS.iter().cloned().collect();
    commands.sort();
    commands
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionConfig {
    /// Number of neighbours requested from the oracle.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Inputs that end the session, compared case-insensitively.
    #[serde(default = "default_exit_commands")]
    pub exit_commands: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            top_n: default_top_n(),
            exit_commands: default_exit_commands(),
        }
    }
}

impl SessionConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SemarithError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, SemarithError> {
        let cfg: SessionConfig = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_exit_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exit_commands = commands.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), SemarithError> {
        if self.top_n == 0 {
            return Err(SemarithError::Config("top_n must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn is_exit_command(&self, input: &str) -> bool {
        let input = input.trim().to_lowercase();
        self.exit_commands
            .iter()
            .any(|command| command.to_lowercase() == input)
    }
}
