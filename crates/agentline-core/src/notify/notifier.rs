//! Progress notifier.
//!
//! Converts generation and tool lifecycle callbacks into an ordered sequence
//! of [`NotificationEvent`]s, delivering each one immediately.
//!
//! # Grouping
//!
//! - Tokens between a generation start and end share one bubble group; only
//!   the first non-empty token is marked `first`.
//! - Tool start, end and error share one inline group per tool invocation.
//!   The end message overwrites the start message; an error is appended.

use serde::{Deserialize, Serialize};

use super::callback::Callback;
use super::event::{DisplayMode, EventKind, GroupId, NotificationEvent};
use super::ids::{Clock, IdGenerator, SystemClock, UuidIds};
use super::sink::Deliver;

/// Display names announced by the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Author of streamed bubbles.
    pub agent_name: String,
    pub task_name: String,
    /// Free-form description of the tools available for the task.
    pub tools_description: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            agent_name: "Agent".to_string(),
            task_name: String::new(),
            tools_description: String::new(),
        }
    }
}

/// Per-session grouping state, updated in place by each callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamState {
    /// Group of the bubble for the active generation.
    pub generation_group: GroupId,

    /// Group of the inline status line for the latest tool invocation.
    pub tool_group: Option<GroupId>,

    /// The next non-empty token opens the bubble.
    pub first_in_group: bool,
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Stateful event sequencer for one generation/tool stream.
///
/// Every callback takes `&mut self`; share a notifier across threads only
/// behind your own lock.
pub struct ProgressNotifier<D: Deliver> {
    sink: D,
    agent_name: String,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    state: StreamState,
}

impl<D: Deliver> ProgressNotifier<D> {
    /// Create a notifier with random group ids and the system clock.
    ///
    /// Delivers the introductory task message before returning.
    pub fn new(sink: D, config: NotifierConfig) -> Result<Self, D::Error> {
        Self::with_sources(sink, config, UuidIds, SystemClock::default())
    }

    /// Create a notifier with explicit id and time sources.
    pub fn with_sources(
        sink: D,
        config: NotifierConfig,
        ids: impl IdGenerator + 'static,
        clock: impl Clock + 'static,
    ) -> Result<Self, D::Error> {
        let mut ids: Box<dyn IdGenerator> = Box::new(ids);
        let state = StreamState {
            generation_group: ids.next_id(),
            tool_group: None,
            first_in_group: true,
        };
        let task_group = ids.next_id();

        let mut notifier = Self {
            sink,
            agent_name: config.agent_name,
            ids,
            clock: Box::new(clock),
            state,
        };

        let text = format!(
            "**Running task**: {} **Available tools**: {}",
            config.task_name, config.tools_description
        );
        notifier.send(EventKind::Message, text, true, task_group, DisplayMode::Inline, None, None)?;
        Ok(notifier)
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Consume the notifier, returning the delivery primitive.
    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Open a new bubble. Emits nothing.
    pub fn on_generation_start(&mut self) {
        self.state.generation_group = self.ids.next_id();
        self.state.first_in_group = true;
        log::debug!("Generation started in group {}", self.state.generation_group);
    }

    /// Stream one token into the current bubble. Empty tokens are dropped.
    pub fn on_token(&mut self, token: &str) -> Result<(), D::Error> {
        if token.is_empty() {
            return Ok(());
        }

        let first = self.state.first_in_group;
        self.state.first_in_group = false;
        self.send(
            EventKind::Message,
            token.to_string(),
            first,
            self.state.generation_group.clone(),
            DisplayMode::Bubble,
            Some(self.agent_name.clone()),
            None,
        )
    }

    /// Close the current bubble.
    pub fn on_generation_end(&mut self) -> Result<(), D::Error> {
        self.send(
            EventKind::Terminate,
            String::new(),
            false,
            self.state.generation_group.clone(),
            DisplayMode::Bubble,
            None,
            None,
        )
    }

    pub fn on_tool_start(&mut self, tool_name: &str) -> Result<(), D::Error> {
        let group = self.ids.next_id();
        self.state.tool_group = Some(group.clone());
        self.send(
            EventKind::Message,
            format!("Using tool: {}", capitalize(tool_name)),
            true,
            group,
            DisplayMode::Inline,
            None,
            None,
        )
    }

    /// Replace the tool's status line with a completion message.
    pub fn on_tool_end(&mut self, tool_name: &str) -> Result<(), D::Error> {
        let group = self.tool_group();
        self.send(
            EventKind::Message,
            format!("Finished using tool: {}", capitalize(tool_name)),
            true,
            group,
            DisplayMode::Inline,
            None,
            Some(true),
        )
    }

    /// Append a failure message below the tool's status line.
    pub fn on_tool_error(&mut self, error_message: &str) -> Result<(), D::Error> {
        let group = self.tool_group();
        self.send(
            EventKind::Message,
            format!("Tool usage failed: {error_message}"),
            true,
            group,
            DisplayMode::Inline,
            None,
            Some(false),
        )
    }

    /// Route a callback value to the matching method.
    pub fn dispatch(&mut self, callback: &Callback) -> Result<(), D::Error> {
        match callback {
            Callback::GenerationStart => {
                self.on_generation_start();
                Ok(())
            }
            Callback::Token { token } => self.on_token(token),
            Callback::GenerationEnd => self.on_generation_end(),
            Callback::ToolStart { tool_name } => self.on_tool_start(tool_name),
            Callback::ToolEnd { tool_name } => self.on_tool_end(tool_name),
            Callback::ToolError { error } => self.on_tool_error(error),
        }
    }

    /// Group of the latest tool invocation, allocating one if no tool started yet.
    fn tool_group(&mut self) -> GroupId {
        if let Some(group) = &self.state.tool_group {
            return group.clone();
        }

        log::warn!("Tool status reported before any tool started; opening a new group");
        let group = self.ids.next_id();
        self.state.tool_group = Some(group.clone());
        group
    }

    #[allow(clippy::too_many_arguments)]
    fn send(
        &mut self,
        kind: EventKind,
        text: String,
        is_first_in_group: bool,
        group_id: GroupId,
        display_mode: DisplayMode,
        author: Option<String>,
        overwrite: Option<bool>,
    ) -> Result<(), D::Error> {
        let event = NotificationEvent {
            kind,
            text,
            is_first_in_group,
            group_id,
            timestamp: self.clock.now_millis(),
            display_mode,
            author,
            overwrite,
        };
        self.sink.deliver(&event)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ids::{FixedClock, SequentialIds};
    use crate::notify::sink::{FnSink, VecSink};

    fn config() -> NotifierConfig {
        NotifierConfig {
            agent_name: "Researcher".to_string(),
            task_name: "Find cats".to_string(),
            tools_description: "search, browse".to_string(),
        }
    }

    fn notifier() -> ProgressNotifier<VecSink> {
        ProgressNotifier::with_sources(
            VecSink::default(),
            config(),
            SequentialIds::new("g"),
            FixedClock(1_000),
        )
        .unwrap()
    }

    fn events(notifier: &ProgressNotifier<VecSink>) -> &[NotificationEvent] {
        &notifier.sink().events
    }

    fn group(id: &str) -> GroupId {
        GroupId(id.to_string())
    }

    mod construction {
        use super::*;

        #[test]
        fn emits_exactly_one_intro_event() {
            let notifier = notifier();
            let events = events(&notifier);
            assert_eq!(events.len(), 1);

            let intro = &events[0];
            assert_eq!(intro.kind, EventKind::Message);
            assert_eq!(
                intro.text,
                "**Running task**: Find cats **Available tools**: search, browse"
            );
            assert!(intro.is_first_in_group);
            assert_eq!(intro.display_mode, DisplayMode::Inline);
            assert_eq!(intro.timestamp, 1_000);
            assert!(intro.author.is_none());
            assert!(intro.overwrite.is_none());
        }

        #[test]
        fn intro_has_its_own_group() {
            let notifier = notifier();
            assert_eq!(notifier.state().generation_group, group("g-1"));
            assert_eq!(events(&notifier)[0].group_id, group("g-2"));
            assert!(notifier.state().tool_group.is_none());
            assert!(notifier.state().first_in_group);
        }

        #[test]
        fn delivery_failure_aborts_construction() {
            let sink = FnSink(|_: &NotificationEvent| {
                Err::<(), _>(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            });
            let result = ProgressNotifier::new(sink, config());
            assert_eq!(
                result.err().map(|e| e.kind()),
                Some(std::io::ErrorKind::BrokenPipe)
            );
        }
    }

    mod generation {
        use super::*;

        #[test]
        fn start_emits_nothing_and_resets_group() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            assert_eq!(events(&notifier).len(), 1);
            assert_eq!(notifier.state().generation_group, group("g-3"));
            assert!(notifier.state().first_in_group);
        }

        #[test]
        fn tokens_share_bubble_and_only_first_is_marked() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            notifier.on_token("Hel").unwrap();
            notifier.on_token("lo").unwrap();

            let tokens = &events(&notifier)[1..];
            assert_eq!(tokens.len(), 2);
            assert!(tokens[0].is_first_in_group);
            assert!(!tokens[1].is_first_in_group);
            for token in tokens {
                assert_eq!(token.group_id, group("g-3"));
                assert_eq!(token.display_mode, DisplayMode::Bubble);
                assert_eq!(token.author.as_deref(), Some("Researcher"));
                assert_eq!(token.kind, EventKind::Message);
            }
        }

        #[test]
        fn empty_token_is_suppressed() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            let before = notifier.state().clone();

            notifier.on_token("").unwrap();

            assert_eq!(events(&notifier).len(), 1);
            assert_eq!(notifier.state(), &before);
        }

        #[test]
        fn empty_token_does_not_consume_first_flag() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            notifier.on_token("").unwrap();
            notifier.on_token("Hi").unwrap();
            assert!(events(&notifier)[1].is_first_in_group);
        }

        #[test]
        fn end_emits_single_terminate() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            notifier.on_token("Hi").unwrap();
            notifier.on_generation_end().unwrap();

            let events = events(&notifier);
            assert_eq!(events.len(), 3);
            let terminate = &events[2];
            assert_eq!(terminate.kind, EventKind::Terminate);
            assert_eq!(terminate.text, "");
            assert_eq!(terminate.group_id, group("g-3"));
        }

        #[test]
        fn end_does_not_reset_group() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            notifier.on_token("Hi").unwrap();
            notifier.on_generation_end().unwrap();
            assert_eq!(notifier.state().generation_group, group("g-3"));
            assert!(!notifier.state().first_in_group);
        }

        #[test]
        fn new_start_opens_new_bubble() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            notifier.on_token("one").unwrap();
            notifier.on_generation_end().unwrap();
            notifier.on_generation_start();
            notifier.on_token("two").unwrap();

            let last = events(&notifier).last().unwrap();
            assert_eq!(last.group_id, group("g-4"));
            assert!(last.is_first_in_group);
        }
    }

    mod tools {
        use super::*;

        #[test]
        fn start_then_end_share_group() {
            let mut notifier = notifier();
            notifier.on_tool_start("search").unwrap();
            notifier.on_tool_end("search").unwrap();

            let events = events(&notifier);
            let (start, end) = (&events[1], &events[2]);
            assert_eq!(start.text, "Using tool: Search");
            assert_eq!(end.text, "Finished using tool: Search");
            assert_eq!(start.group_id, end.group_id);
            assert!(start.is_first_in_group);
            assert!(start.overwrite.is_none());
            assert_eq!(end.overwrite, Some(true));
            assert_eq!(end.display_mode, DisplayMode::Inline);
        }

        #[test]
        fn error_appends_to_tool_group() {
            let mut notifier = notifier();
            notifier.on_tool_start("search").unwrap();
            notifier.on_tool_error("timeout").unwrap();

            let events = events(&notifier);
            let error = &events[2];
            assert_eq!(error.text, "Tool usage failed: timeout");
            assert_eq!(error.group_id, events[1].group_id);
            assert_eq!(error.overwrite, Some(false));
            assert_eq!(error.display_mode, DisplayMode::Inline);
        }

        #[test]
        fn each_start_gets_fresh_group() {
            let mut notifier = notifier();
            notifier.on_tool_start("search").unwrap();
            notifier.on_tool_start("browse").unwrap();
            let events = events(&notifier);
            assert_ne!(events[1].group_id, events[2].group_id);
        }

        #[test]
        fn tool_events_do_not_touch_generation_state() {
            let mut notifier = notifier();
            notifier.on_generation_start();
            let before = notifier.state().generation_group.clone();
            notifier.on_tool_start("search").unwrap();
            notifier.on_token("still here").unwrap();

            let token = events(&notifier).last().unwrap();
            assert_eq!(token.group_id, before);
            assert!(token.is_first_in_group);
        }

        #[test]
        fn end_without_start_opens_group() {
            let mut notifier = notifier();
            notifier.on_tool_end("search").unwrap();
            let end = events(&notifier).last().unwrap();
            assert_eq!(Some(&end.group_id), notifier.state().tool_group.as_ref());
        }

        #[test]
        fn rest_of_name_is_lowercased() {
            assert_eq!(capitalize("webSearch"), "Websearch");
            assert_eq!(capitalize("DuckDuckGo"), "Duckduckgo");
            assert_eq!(capitalize("émile"), "Émile");
            assert_eq!(capitalize(""), "");
        }

        #[test]
        fn mixed_case_tool_names_in_event_text() {
            let mut notifier = notifier();
            notifier.on_tool_start("webSearch").unwrap();
            notifier.on_tool_end("DuckDuckGo").unwrap();

            let events = events(&notifier);
            assert_eq!(events[1].text, "Using tool: Websearch");
            assert_eq!(events[2].text, "Finished using tool: Duckduckgo");
        }
    }

    mod dispatch {
        use super::*;

        #[test]
        fn routes_every_callback() {
            let mut notifier = notifier();
            let script = [
                Callback::GenerationStart,
                Callback::Token {
                    token: "Hi".to_string(),
                },
                Callback::GenerationEnd,
                Callback::ToolStart {
                    tool_name: "search".to_string(),
                },
                Callback::ToolError {
                    error: "boom".to_string(),
                },
                Callback::ToolEnd {
                    tool_name: "search".to_string(),
                },
            ];
            for callback in &script {
                notifier.dispatch(callback).unwrap();
            }

            let texts: Vec<&str> = events(&notifier).iter().map(|e| e.text.as_str()).collect();
            assert_eq!(
                texts,
                vec![
                    "**Running task**: Find cats **Available tools**: search, browse",
                    "Hi",
                    "",
                    "Using tool: Search",
                    "Tool usage failed: boom",
                    "Finished using tool: Search",
                ]
            );
        }

        #[test]
        fn delivery_failure_propagates_from_callback() {
            let mut calls = 0;
            let sink = FnSink(move |_: &NotificationEvent| {
                calls += 1;
                if calls > 1 {
                    Err(std::io::Error::new(std::io::ErrorKind::Other, "gone"))
                } else {
                    Ok(())
                }
            });
            let mut notifier = ProgressNotifier::with_sources(
                sink,
                config(),
                SequentialIds::new("g"),
                FixedClock(0),
            )
            .unwrap();

            notifier.on_generation_start();
            let err = notifier.on_token("Hi").unwrap_err();
            assert_eq!(err.to_string(), "gone");
            // The flag was consumed before the failed delivery.
            assert!(!notifier.state().first_in_group);
        }
    }
}
