//! Notification events handed to the delivery primitive.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier correlating the events of one bubble or inline message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Content to render.
    Message,
    /// Close the current bubble.
    Terminate,
}

/// How the consumer groups text on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Continuously appended block (streamed model output).
    Bubble,
    /// Single standalone line (task and tool status).
    Inline,
}

/// One delivered notification.
///
/// Serializes with the field names consumers expect on the wire:
/// `text`, `event`, `first`, `chunk_id`, `timestamp`, `display_type`,
/// and optionally `author_name` and `overwrite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "event")]
    pub kind: EventKind,

    pub text: String,

    /// First event of its group; the consumer opens a new bubble or line.
    #[serde(rename = "first")]
    pub is_first_in_group: bool,

    #[serde(rename = "chunk_id")]
    pub group_id: GroupId,

    /// Milliseconds since the Unix epoch, never decreasing per notifier.
    pub timestamp: i64,

    #[serde(rename = "display_type")]
    pub display_mode: DisplayMode,

    #[serde(
        rename = "author_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,

    /// Replace (true) or keep (false) the previous message of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
}

// ============================================================================
// TESTS
// ============================================================================
