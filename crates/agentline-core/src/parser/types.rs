//! Structured outcomes produced by the output parsers.

use serde::{Deserialize, Serialize};

/// A request to invoke one tool with one textual argument blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Reasoning that preceded the action, empty when none was found.
    #[serde(default)]
    pub reasoning: String,
    pub tool_name: String,
    pub tool_input: String,
    /// The complete text the request was parsed from.
    pub raw_text: String,
}

/// The agent loop is done and produced a final textual result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalAnswer {
    #[serde(default)]
    pub reasoning: String,
    pub answer: String,
    pub raw_text: String,
}

/// Result of parsing one completed generation.
///
/// Failures live on the `Err` side of [`super::ParseResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseOutcome {
    Action(ActionRequest),
    Finish(FinalAnswer),
}

impl ParseOutcome {
    /// Reasoning attached to either variant.
    pub fn reasoning(&self) -> &str {
        match self {
            ParseOutcome::Action(action) => &action.reasoning,
            ParseOutcome::Finish(finish) => &finish.reasoning,
        }
    }

    pub fn raw_text(&self) -> &str {
        match self {
            ParseOutcome::Action(action) => &action.raw_text,
            ParseOutcome::Finish(finish) => &finish.raw_text,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, ParseOutcome::Finish(_))
    }
}
