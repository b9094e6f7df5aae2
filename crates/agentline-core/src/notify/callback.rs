//! Lifecycle callbacks as data.
//!
//! A driving loop (or a recorded NDJSON script) can hand these to
//! [`super::ProgressNotifier::dispatch`] instead of calling each method.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "callback", rename_all = "snake_case")]
pub enum Callback {
    GenerationStart,
    Token { token: String },
    GenerationEnd,
    ToolStart { tool_name: String },
    ToolEnd { tool_name: String },
    ToolError { error: String },
}
