//! Default ReAct-style output parser.
//!
//! Recognizes the `Thought: / Action: / Action Input:` layout and the
//! `Final Answer:` marker. This is the fallback collaborator that the
//! specialized parsers compose, and the owner of the shared extraction rules.
//!
//! # Decision order
//!
//! 1. Action pattern and final-answer marker both present → ambiguous
//! 2. Action pattern → [`ActionRequest`]
//! 3. Final-answer marker → [`FinalAnswer`] (text after the *last* marker)
//! 4. Otherwise a [`ParseError::MalformedOutput`] naming the missing label

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::config::ParserConfig;
use super::error::{MalformedReason, ParseError, FINAL_ANSWER_ACTION};
use super::types::{ActionRequest, FinalAnswer, ParseOutcome};
use super::{OutputParser, ParseResult};

/// `Action: <name> ... Action Input: <input>`, with optional numeric suffixes.
pub(crate) static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .unwrap()
});

static ACTION_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Action\s*\d*\s*:").unwrap());

static ACTION_INPUT_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Action\s*\d*\s*Input\s*\d*\s*:").unwrap());

const CODE_FENCE: &str = "```";

/// Extract the reasoning that precedes the first action or final answer.
///
/// Returns an empty string when neither `"\n\nAction"` nor
/// `"\n\nFinal Answer"` occurs. Code fences are stripped from the result.
pub fn extract_thought(text: &str) -> String {
    let index = text
        .find("\n\nAction")
        .or_else(|| text.find("\n\nFinal Answer"));

    match index {
        Some(index) => text[..index]
            .trim()
            .replace(CODE_FENCE, "")
            .trim()
            .to_string(),
        None => String::new(),
    }
}

/// Strip whitespace and markdown emphasis around an action name.
fn clean_action(action: &str) -> String {
    action.trim().trim_matches('*').trim().to_string()
}

/// Normalize a tool input that looks like a JSON object.
///
/// This is not a JSON repair: broken JSON (trailing commas, unclosed braces)
/// is passed through as given. Arrays and scalars are never rewritten. A
/// non-empty object is re-serialized compactly, keeping key order and number
/// precision. Triple quotes are always collapsed.
fn normalize_tool_input(input: &str) -> String {
    if input.starts_with('[') && input.ends_with(']') {
        return input.to_string();
    }

    let collapsed = input.replace("\"\"\"", "\"");
    match serde_json::from_str::<Value>(&collapsed) {
        Ok(Value::Object(map)) if !map.is_empty() => {
            serde_json::to_string(&map).unwrap_or(collapsed)
        }
        _ => collapsed,
    }
}

/// Drop a trailing code fence left open by the model.
fn close_dangling_fence(answer: &str) -> &str {
    if answer.ends_with(CODE_FENCE) && answer.matches(CODE_FENCE).count() % 2 != 0 {
        answer[..answer.len() - CODE_FENCE.len()].trim_end()
    } else {
        answer
    }
}

/// The base parser. Holds only its marker string.
#[derive(Debug, Clone)]
pub struct DefaultParser {
    final_answer_marker: String,
}

impl Default for DefaultParser {
    fn default() -> Self {
        Self {
            final_answer_marker: FINAL_ANSWER_ACTION.to_string(),
        }
    }
}

impl DefaultParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ParserConfig) -> Self {
        Self {
            final_answer_marker: config.final_answer_marker.clone(),
        }
    }

    pub fn final_answer_marker(&self) -> &str {
        &self.final_answer_marker
    }

    /// Classify text that carries neither a parsable action nor an answer.
    fn diagnose(&self, text: &str) -> ParseError {
        let reason = if !ACTION_LABEL_RE.is_match(text) {
            MalformedReason::MissingAction
        } else if !ACTION_INPUT_LABEL_RE.is_match(text) {
            MalformedReason::MissingActionInput
        } else {
            MalformedReason::InvalidFormat
        };

        log::debug!("Malformed agent output ({reason:?})");
        ParseError::MalformedOutput {
            reason,
            text: text.to_string(),
        }
    }
}

impl OutputParser for DefaultParser {
    fn parse(&self, text: &str) -> ParseResult {
        let reasoning = extract_thought(text);
        let includes_answer = text.contains(&self.final_answer_marker);

        if let Some(captures) = ACTION_RE.captures(text) {
            if includes_answer {
                return Err(ParseError::AmbiguousOutput {
                    text: text.to_string(),
                });
            }

            let tool_name = clean_action(captures.get(1).map_or("", |m| m.as_str()));
            let raw_input = captures.get(2).map_or("", |m| m.as_str()).trim();
            let tool_input = normalize_tool_input(raw_input.trim_matches('"'));

            return Ok(ParseOutcome::Action(ActionRequest {
                reasoning,
                tool_name,
                tool_input,
                raw_text: text.to_string(),
            }));
        }

        if includes_answer {
            let tail = text
                .rsplit(self.final_answer_marker.as_str())
                .next()
                .unwrap_or_default()
                .trim();

            return Ok(ParseOutcome::Finish(FinalAnswer {
                reasoning,
                answer: close_dangling_fence(tail).to_string(),
                raw_text: text.to_string(),
            }));
        }

        Err(self.diagnose(text))
    }
}

// ============================================================================
// TESTS
// ============================================================================
