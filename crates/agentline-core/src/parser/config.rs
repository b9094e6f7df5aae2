//! Parser configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::FINAL_ANSWER_ACTION;

/// Matches placeholder final-answer markers such as
/// `Final Answer: (your answer here)` or `**Final Answer**: (example)**`.
pub const DEFAULT_PLACEHOLDER_PATTERN: &str = r"Final Answer[\s:\n*]*\(.*\)\*?\*?";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid placeholder pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Marker strings and ambiguity patterns used by the parsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Literal that introduces a final answer.
    pub final_answer_marker: String,

    /// Regex matching instructional echoes of the marker.
    pub placeholder_pattern: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            final_answer_marker: FINAL_ANSWER_ACTION.to_string(),
            placeholder_pattern: DEFAULT_PLACEHOLDER_PATTERN.to_string(),
        }
    }
}

impl ParserConfig {
    pub(crate) fn compile_placeholder(&self) -> Result<Regex, ConfigError> {
        Ok(Regex::new(&self.placeholder_pattern)?)
    }
}
