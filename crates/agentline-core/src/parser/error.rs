//! Parse failures and the diagnostic texts they carry.

use std::fmt;

use thiserror::Error;

/// Literal marker that introduces a final answer.
pub const FINAL_ANSWER_ACTION: &str = "Final Answer:";

pub const FINAL_ANSWER_AND_PARSABLE_ACTION_ERROR_MESSAGE: &str =
    "I did it wrong. Tried to both perform Action and give a Final Answer at the same time, I must do one or the other";

pub const MISSING_ACTION_AFTER_THOUGHT_ERROR_MESSAGE: &str =
    "I did it wrong. Invalid Format: I missed the 'Action:' after 'Thought:'. I will do right next, and don't use a tool I have already used.\n";

pub const MISSING_ACTION_INPUT_AFTER_ACTION_ERROR_MESSAGE: &str =
    "I did it wrong. Invalid Format: I missed the 'Action Input:' after 'Action:'. I will do right next, and don't use a tool I have already used.\n";

/// Reminder of the expected final-answer layout, appended to missing-action diagnostics.
pub const FINAL_ANSWER_FORMAT: &str = "If you don't need to use any more tools, you must give your best complete final answer, make sure it satisfies the expected criteria, use the EXACT format below:\n\nThought: I now can give a great answer\nFinal Answer: my best complete final answer to the task.\n";

/// Reminder of the full tool-use layout, used when markers are present but out of order.
pub const FORMAT_WITHOUT_TOOLS: &str = "\nSorry, I didn't use the right format. I MUST either use a tool (among the available ones), OR give my best final answer.\nHere is the expected format I must follow:\n\nQuestion: the input question you must answer\nThought: you should always think about what to do\nAction: the action to take\nAction Input: the input to the action\nObservation: the result of the action\n\nThis Thought/Action/Action Input/Result process can repeat N times. Once I know the final answer, I must return the following format:\n\nThought: I now can give a great answer\nFinal Answer: Your final answer here\n";

/// Which base rule rejected a non-conforming output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// No `Action:` label anywhere in the text.
    MissingAction,
    /// An `Action:` label without a following `Action Input:`.
    MissingActionInput,
    /// Both labels exist but not in a parsable arrangement.
    InvalidFormat,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingAction => write!(
                f,
                "{}\n{}",
                MISSING_ACTION_AFTER_THOUGHT_ERROR_MESSAGE, FINAL_ANSWER_FORMAT
            ),
            MalformedReason::MissingActionInput => {
                f.write_str(MISSING_ACTION_INPUT_AFTER_ACTION_ERROR_MESSAGE)
            }
            MalformedReason::InvalidFormat => f.write_str(FORMAT_WITHOUT_TOOLS),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text both requests a tool and declares completion.
    #[error("{prefix}: {text}", prefix = FINAL_ANSWER_AND_PARSABLE_ACTION_ERROR_MESSAGE)]
    AmbiguousOutput { text: String },

    /// Neither a valid action nor a final answer could be recovered.
    #[error("{reason}")]
    MalformedOutput {
        reason: MalformedReason,
        text: String,
    },
}

impl ParseError {
    /// The offending model output, verbatim.
    pub fn raw_text(&self) -> &str {
        match self {
            ParseError::AmbiguousOutput { text } => text,
            ParseError::MalformedOutput { text, .. } => text,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ParseError::AmbiguousOutput { .. })
    }

    /// The base rule that failed, for malformed outputs.
    pub fn malformed_reason(&self) -> Option<MalformedReason> {
        match self {
            ParseError::MalformedOutput { reason, .. } => Some(*reason),
            ParseError::AmbiguousOutput { .. } => None,
        }
    }
}
