//! Placeholder-aware parser for Gemini-style outputs.
//!
//! Gemini models often echo the instruction template back, producing lines
//! like `Final Answer: (your final answer here)` next to a perfectly valid
//! action. The default parser treats any marker as a real answer and rejects
//! such output as ambiguous. This parser only counts a marker as genuine when
//! the text contains no placeholder occurrence.
//!
//! # Decision order
//!
//! 1. Action pattern and a genuine answer → ambiguous
//! 2. Action pattern → [`ActionRequest`]
//! 3. Genuine answer → [`FinalAnswer`] (text after the *first* marker)
//! 4. Otherwise → the composed fallback parser
//!
//! The placeholder guard is not applied on the fallback path: a placeholder
//! that reaches the fallback is judged by the fallback's own rules.

use regex::Regex;

use super::config::{ConfigError, ParserConfig};
use super::default::{extract_thought, DefaultParser, ACTION_RE};
use super::error::ParseError;
use super::types::{ActionRequest, FinalAnswer, ParseOutcome};
use super::{OutputParser, ParseResult};

/// Strip one layer of surrounding double quotes.
fn unquote(input: &str) -> &str {
    let input = input.strip_prefix('"').unwrap_or(input);
    input.strip_suffix('"').unwrap_or(input)
}

/// Parser that ignores placeholder final-answer markers.
///
/// Composes a fallback parser `P` for text that carries neither an action
/// nor a genuine answer.
#[derive(Debug, Clone)]
pub struct GeminiOutputParser<P = DefaultParser> {
    final_answer_marker: String,
    placeholder: Regex,
    fallback: P,
}

impl GeminiOutputParser<DefaultParser> {
    /// Build with the default marker and placeholder pattern.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        Self {
            placeholder: config
                .compile_placeholder()
                .expect("default placeholder pattern is valid"),
            fallback: DefaultParser::with_config(&config),
            final_answer_marker: config.final_answer_marker,
        }
    }

    /// Build from configuration, with a [`DefaultParser`] sharing the same marker.
    pub fn with_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        Self::with_fallback(config, DefaultParser::with_config(config))
    }
}

impl Default for GeminiOutputParser<DefaultParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputParser> GeminiOutputParser<P> {
    /// Build from configuration around an arbitrary fallback parser.
    pub fn with_fallback(config: &ParserConfig, fallback: P) -> Result<Self, ConfigError> {
        Ok(Self {
            final_answer_marker: config.final_answer_marker.clone(),
            placeholder: config.compile_placeholder()?,
            fallback,
        })
    }

    /// True when the marker is present and no placeholder occurrence is.
    pub fn has_genuine_final_answer(&self, text: &str) -> bool {
        text.contains(&self.final_answer_marker) && !self.placeholder.is_match(text)
    }

    pub fn fallback(&self) -> &P {
        &self.fallback
    }
}

impl<P: OutputParser> OutputParser for GeminiOutputParser<P> {
    fn parse(&self, text: &str) -> ParseResult {
        let reasoning = extract_thought(text);
        let includes_answer = self.has_genuine_final_answer(text);

        if let Some(captures) = ACTION_RE.captures(text) {
            if includes_answer {
                log::debug!("Rejecting output with both an action and a final answer");
                return Err(ParseError::AmbiguousOutput {
                    text: text.to_string(),
                });
            }

            let tool_name = captures.get(1).map_or("", |m| m.as_str()).trim();
            let tool_input = unquote(captures.get(2).map_or("", |m| m.as_str()).trim());
            log::debug!("Parsed action request for tool {tool_name:?}");

            return Ok(ParseOutcome::Action(ActionRequest {
                reasoning,
                tool_name: tool_name.to_string(),
                tool_input: tool_input.to_string(),
                raw_text: text.to_string(),
            }));
        }

        if includes_answer {
            let answer = text
                .split_once(self.final_answer_marker.as_str())
                .map_or("", |(_, rest)| rest)
                .trim();

            return Ok(ParseOutcome::Finish(FinalAnswer {
                reasoning,
                answer: answer.to_string(),
                raw_text: text.to_string(),
            }));
        }

        log::debug!("No action or genuine final answer; delegating to fallback parser");
        self.fallback.parse(text)
    }
}

// ============================================================================
// TESTS
// ============================================================================
