//! Subcommand implementations, generic over their input and output streams.

use std::io::{BufRead, Read, Write};

use agentline_core::notify::{Callback, FnSink, NotificationEvent};
use agentline_core::transcript::TranscriptSink;
use agentline_core::{Deliver, NotifierConfig, OutputParser, ProgressNotifier};

use crate::error::CliError;

/// Parse one generation read from `input` and write the outcome as JSON.
pub fn run_parse<R: Read, W: Write>(
    mut input: R,
    mut out: W,
    parser: &dyn OutputParser,
) -> Result<(), CliError> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let outcome = parser.parse(&text)?;
    serde_json::to_writer_pretty(&mut out, &outcome).map_err(|source| CliError::Json {
        context: "parse outcome".to_string(),
        source,
    })?;
    writeln!(out)?;
    Ok(())
}

/// Drive a notifier from NDJSON callbacks, writing one event per line.
///
/// Each event is also delivered to `transcript` when one is given. Returns
/// the number of callbacks dispatched.
pub fn run_replay<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    config: NotifierConfig,
    mut transcript: Option<TranscriptSink>,
) -> Result<usize, CliError> {
    let sink = FnSink(move |event: &NotificationEvent| -> std::io::Result<()> {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
        if let Some(transcript) = transcript.as_mut() {
            transcript.deliver(event)?;
        }
        Ok(())
    });
    let mut notifier = ProgressNotifier::new(sink, config)?;

    let mut dispatched = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let callback: Callback = serde_json::from_str(&line).map_err(|source| CliError::Json {
            context: format!("callback on line {}", index + 1),
            source,
        })?;
        notifier.dispatch(&callback)?;
        dispatched += 1;
    }

    log::debug!("Replayed {dispatched} callbacks");
    Ok(dispatched)
}
