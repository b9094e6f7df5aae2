//! Output parsers.
//!
//! Turn one completed block of model output into either a tool request or a
//! final answer.
//!
//! # Strategies
//!
//! - [`DefaultParser`] — the base ReAct rules, including the diagnostics for
//!   non-conforming text
//! - [`GeminiOutputParser`] — ignores placeholder `Final Answer: (...)` echoes,
//!   composing a fallback parser for everything it does not recognize
//!
//! # Example Usage
//!
//! ```
//! use agentline_core::parser::{GeminiOutputParser, OutputParser, ParseOutcome};
//!
//! let parser = GeminiOutputParser::new();
//! let outcome = parser.parse("Action: search\nAction Input: \"cats\"").unwrap();
//!
//! match outcome {
//!     ParseOutcome::Action(action) => assert_eq!(action.tool_input, "cats"),
//!     ParseOutcome::Finish(_) => unreachable!(),
//! }
//! ```

mod config;
mod default;
mod error;
mod gemini;
mod types;

pub use config::{ConfigError, ParserConfig, DEFAULT_PLACEHOLDER_PATTERN};
pub use default::{extract_thought, DefaultParser};
pub use error::*;
pub use gemini::GeminiOutputParser;
pub use types::*;

pub type ParseResult = Result<ParseOutcome, ParseError>;

/// A parsing policy.
///
/// Implementations are pure: the outcome depends only on the input text and
/// the parser's static configuration.
pub trait OutputParser: Send + Sync {
    fn parse(&self, text: &str) -> ParseResult;
}

impl<P: OutputParser + ?Sized> OutputParser for Box<P> {
    fn parse(&self, text: &str) -> ParseResult {
        (**self).parse(text)
    }
}
