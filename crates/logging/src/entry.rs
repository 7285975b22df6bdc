//! crates/logging/src/entry.rs
//! The immutable snapshot handed from the registry to the formatter.

use std::thread::{self, ThreadId};

use chrono::Local;
use serde_json::Value;

use crate::code::LogCode;
use crate::level::Level;

/// Call-site key/value data attached to a single log statement.
pub type Fields = serde_json::Map<String, Value>;

/// Fixed textual layout of entry timestamps: second resolution, local time.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One log statement, frozen at log time.
///
/// An entry captures everything the formatter needs except the calling
/// thread's metadata view, which is threaded through the rendering step
/// separately so the snapshot itself stays cheap to build. Entries are
/// created once inside [`ChannelRegistry::log`](crate::ChannelRegistry::log)
/// and consumed immediately; they are never retained.
#[derive(Clone, Debug)]
pub struct LogEntry {
    /// Channel the statement was logged on.
    pub channel: String,
    /// Severity of the statement. Never [`Level::Off`].
    pub level: Level,
    /// Message text; may span multiple lines.
    pub message: String,
    /// Validated classification code, when the call site supplied one.
    pub code: Option<LogCode>,
    /// Call-site extra data.
    pub fields: Fields,
    /// Local-time stamp in `%Y/%m/%d %H:%M:%S` layout.
    pub timestamp: String,
    /// Process-wide service label, when configured.
    pub service_name: Option<String>,
    /// Calling thread's indentation depth at log time.
    pub indent: u32,
    /// Identity of the thread that produced the statement.
    pub thread_id: ThreadId,
}

impl LogEntry {
    /// Builds a snapshot stamped with the current time and calling thread.
    pub(crate) fn new(
        channel: &str,
        level: Level,
        message: &str,
        code: Option<LogCode>,
        fields: Fields,
        service_name: Option<String>,
        indent: u32,
    ) -> Self {
        Self {
            channel: channel.to_owned(),
            level,
            message: message.to_owned(),
            code,
            fields,
            timestamp: current_timestamp(),
            service_name,
            indent,
            thread_id: thread::current().id(),
        }
    }
}

/// Stamps the current local time in the fixed entry layout.
pub(crate) fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Renders a thread identity in the compact form used by both formatters.
///
/// [`ThreadId`] exposes no stable numeric accessor, so the digits are
/// recovered from its `Debug` form (`ThreadId(N)`), falling back to the raw
/// form should that shape ever change.
pub(crate) fn render_thread_id(id: ThreadId) -> String {
    let raw = format!("{id:?}");
    raw.strip_prefix("ThreadId(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(&raw)
        .to_owned()
}
