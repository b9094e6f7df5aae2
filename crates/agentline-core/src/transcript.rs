//! Append-only transcript files.
//!
//! [`TranscriptSink`] appends one timestamped line per delivered event to
//! `{dir}/{id}.log`.

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

use chrono::{SecondsFormat, Utc};

use crate::notify::{Deliver, NotificationEvent};

/// Current UTC time as ISO 8601 with milliseconds (e.g. 2026-02-04T10:15:30.123Z).
fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn write_line(file: &mut File, label: &str, data: &str) -> io::Result<()> {
    writeln!(file, "[{}] {}: {}", utc_timestamp(), label, data)?;
    file.flush()
}

/// Delivers each event as a JSON transcript line keyed by its group id.
///
/// Write failures are returned to the caller.
pub struct TranscriptSink {
    file: File,
}

impl TranscriptSink {
    pub fn create(dir: &Path, id: &str) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{}.log", id)))?;
        Ok(Self { file })
    }
}

impl Deliver for TranscriptSink {
    type Error = io::Error;

    fn deliver(&mut self, event: &NotificationEvent) -> io::Result<()> {
        let json = serde_json::to_string(event)?;
        write_line(&mut self.file, &event.group_id.0, &json)
    }
}
