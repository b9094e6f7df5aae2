//! # agentline-core
//!
//! Interprets agent model output and narrates generation progress.
//!
//! ## Key Concepts
//!
//! - **OutputParser**: classifies one completed generation as a tool request
//!   or a final answer, rejecting ambiguous and malformed text
//! - **ProgressNotifier**: turns generation and tool lifecycle callbacks into
//!   grouped notification events for a delivery primitive
//! - **Deliver**: the delivery primitive (closure, in-memory buffer, transcript file)

pub mod notify;
pub mod parser;
pub mod transcript;

// Re-export commonly used types
pub use notify::{Deliver, NotificationEvent, NotifierConfig, ProgressNotifier};
pub use parser::{
    DefaultParser, GeminiOutputParser, OutputParser, ParseError, ParseOutcome, ParserConfig,
};
