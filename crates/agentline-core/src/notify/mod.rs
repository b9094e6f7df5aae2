//! Progress notifications for streamed generations and tool calls.
//!
//! # Example Usage
//!
//! ```
//! use agentline_core::notify::{NotifierConfig, ProgressNotifier, VecSink};
//!
//! let config = NotifierConfig {
//!     agent_name: "Researcher".to_string(),
//!     task_name: "Find cats".to_string(),
//!     tools_description: "search".to_string(),
//! };
//! let mut notifier = ProgressNotifier::new(VecSink::default(), config).unwrap();
//!
//! notifier.on_generation_start();
//! notifier.on_token("Looking").unwrap();
//! notifier.on_generation_end().unwrap();
//!
//! // intro + token + terminate
//! assert_eq!(notifier.sink().events.len(), 3);
//! ```

mod callback;
mod event;
mod ids;
mod notifier;
mod sink;

pub use callback::Callback;
pub use event::{DisplayMode, EventKind, GroupId, NotificationEvent};
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIds};
pub use notifier::{NotifierConfig, ProgressNotifier, StreamState};
pub use sink::{Deliver, FnSink, VecSink};
