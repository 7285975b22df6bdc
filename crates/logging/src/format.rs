//! crates/logging/src/format.rs
//! Rendering strategies: human-readable lines and structured JSON records.

use serde_json::Value;

use crate::entry::{Fields, LogEntry, render_thread_id};

/// Channel names wider than this are truncated in pretty headers. The
/// underlying entry keeps the full name.
const CHANNEL_WIDTH: usize = 5;

/// Text prepended once per indentation level in pretty output.
const INDENT_VALUE: &str = "  ";

/// Ambient state threaded through rendering alongside the entry.
///
/// The entry snapshot itself stays formatter-agnostic; whether thread ids
/// appear, and which metadata view applies, is decided by the registry at
/// render time and passed here.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderState<'a> {
    /// Whether the calling thread's identity is rendered.
    pub thread_id: bool,
    /// The calling thread's metadata view, present only when metadata
    /// rendering is enabled and the thread has any.
    pub metadata: Option<&'a Fields>,
}

/// A rendering strategy turning one entry into output lines.
///
/// Formatters are stateless: the registry holds exactly one active
/// formatter, shared by every entry rendered after a swap, and may swap it
/// at any time. Each returned line is fully rendered and newline-terminated
/// so sinks write them verbatim.
pub trait Formatter: Send + Sync {
    /// Renders `entry` into ordered, newline-terminated lines.
    fn format_entry(&self, entry: &LogEntry, state: &RenderState<'_>) -> Vec<String>;
}

/// Human-readable formatter: one greppable line per message line and per
/// key/value pair.
///
/// Every line shares a header carrying the timestamp, the optional service
/// name, the channel padded or truncated to a fixed width, the 4-character
/// level code, the optional thread id, and the optional log code, followed
/// by two spaces per indentation level:
///
/// ```text
/// 2024/07/01 13:45:09 <gateway> [MAIN :DBUG:12] <NET00000042E>   payload line
/// ```
///
/// Multi-line messages produce one rendered line per message line, then one
/// line per call-site field, then one line per metadata entry when metadata
/// rendering is enabled. Each line is self-contained so downstream tooling
/// can grep them independently.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrettyFormatter;

impl PrettyFormatter {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn header(entry: &LogEntry, state: &RenderState<'_>) -> String {
        let mut header = entry.timestamp.clone();

        if let Some(service) = &entry.service_name {
            header.push_str(" <");
            header.push_str(service);
            header.push('>');
        }

        let mut channel: String = entry.channel.chars().take(CHANNEL_WIDTH).collect();
        while channel.chars().count() < CHANNEL_WIDTH {
            channel.push(' ');
        }
        header.push_str(" [");
        header.push_str(&channel);
        header.push(':');
        header.push_str(entry.level.short_code());
        if state.thread_id {
            header.push(':');
            header.push_str(&render_thread_id(entry.thread_id));
        }
        header.push(']');

        if let Some(code) = &entry.code {
            header.push(' ');
            header.push_str(code.as_str());
        }

        header.push(' ');
        for _ in 0..entry.indent {
            header.push_str(INDENT_VALUE);
        }
        header
    }

    fn push_pair(lines: &mut Vec<String>, header: &str, key: &str, value: &Value) {
        let rendered = serde_json::to_string(value).unwrap_or_else(|_| "null".to_owned());
        lines.push(format!("{header}{key}: {rendered}\n"));
    }
}

impl Formatter for PrettyFormatter {
    fn format_entry(&self, entry: &LogEntry, state: &RenderState<'_>) -> Vec<String> {
        let header = Self::header(entry, state);
        let mut lines = Vec::new();

        if !entry.message.is_empty() {
            for line in entry.message.split('\n') {
                lines.push(format!("{header}{line}\n"));
            }
        }

        for (key, value) in &entry.fields {
            Self::push_pair(&mut lines, &header, key, value);
        }

        if let Some(metadata) = state.metadata {
            for (key, value) in metadata {
                Self::push_pair(&mut lines, &header, key, value);
            }
        }

        lines
    }
}

/// Structured formatter: exactly one JSON record per entry.
///
/// The record is built in three layers so collisions resolve the same way
/// every time: the calling thread's metadata first, call-site fields second
/// (a call site overrides ambient metadata for the same key), and the
/// reserved fields last. The reserved names (`channel`, `level_str`,
/// `timestamp`, `num_indent`, and the conditional `message`, `thread_id`,
/// `service_name`, `log_code`) therefore always win over caller-supplied
/// keys; a colliding caller key is overwritten, never emitted alongside.
///
/// `message` is included only when non-empty, `thread_id` only when the
/// annotation is enabled, `service_name` only when configured, `log_code`
/// only when the call site attached one. Keys are emitted in sorted order,
/// making records deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format_entry(&self, entry: &LogEntry, state: &RenderState<'_>) -> Vec<String> {
        let mut record = state.metadata.cloned().unwrap_or_default();

        for (key, value) in &entry.fields {
            record.insert(key.clone(), value.clone());
        }

        record.insert("channel".to_owned(), Value::from(entry.channel.clone()));
        record.insert(
            "level_str".to_owned(),
            Value::from(entry.level.as_str().to_owned()),
        );
        record.insert("timestamp".to_owned(), Value::from(entry.timestamp.clone()));
        record.insert("num_indent".to_owned(), Value::from(entry.indent));

        if !entry.message.is_empty() {
            record.insert("message".to_owned(), Value::from(entry.message.clone()));
        }
        if state.thread_id {
            record.insert(
                "thread_id".to_owned(),
                Value::from(render_thread_id(entry.thread_id)),
            );
        }
        if let Some(service) = &entry.service_name {
            record.insert("service_name".to_owned(), Value::from(service.clone()));
        }
        if let Some(code) = &entry.code {
            record.insert("log_code".to_owned(), Value::from(code.as_str().to_owned()));
        }

        let rendered =
            serde_json::to_string(&Value::Object(record)).unwrap_or_else(|_| "{}".to_owned());
        vec![format!("{rendered}\n")]
    }
}
