//! Sources of group ids and timestamps, injected into the notifier.

use chrono::Utc;

use super::event::GroupId;

/// Produces fresh group ids.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> GroupId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> GroupId {
        GroupId::new()
    }
}

/// Deterministic `{prefix}-{n}` ids, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> GroupId {
        let id = GroupId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Millisecond timestamps for events.
pub trait Clock: Send {
    fn now_millis(&mut self) -> i64;
}

/// Wall clock in Unix milliseconds, clamped so it never goes backwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock {
    last: i64,
}

impl Clock for SystemClock {
    fn now_millis(&mut self) -> i64 {
        self.last = self.last.max(Utc::now().timestamp_millis());
        self.last
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&mut self) -> i64 {
        self.0
    }
}
