//! crates/logging/src/registry.rs
//! The thread-safe facade composing filters, context, formatting, and sinks.

use std::sync::{Arc, Mutex, OnceLock, RwLock};

use logging_sink::Sink;
use serde_json::Value;

use crate::code::LogCode;
use crate::context::ThreadContextMap;
use crate::entry::{Fields, LogEntry};
use crate::error::{LogError, LogResult};
use crate::filter::FilterConfig;
use crate::format::{Formatter, PrettyFormatter, RenderState};
use crate::level::Level;

/// Mutator-guarded configuration snapshot.
///
/// Everything a log call reads lives in one value behind the registry's
/// `RwLock`, so a reconfiguration is atomic with respect to readers: a
/// reader sees either the whole old configuration or the whole new one,
/// never a half-updated filter map.
struct Config {
    filters: FilterConfig,
    formatter: Option<Arc<dyn Formatter>>,
    service_name: Option<String>,
    thread_id: bool,
    metadata: bool,
}

impl Config {
    fn unconfigured() -> Self {
        Self {
            filters: FilterConfig::silent(),
            formatter: Some(Arc::new(PrettyFormatter::new())),
            service_name: None,
            thread_id: false,
            metadata: false,
        }
    }
}

/// Process-wide channel registry: the single entry point for log calls.
///
/// The registry accepts statements tagged with a channel and a
/// [`Level`], filters them against per-channel configuration, stamps an
/// immutable [`LogEntry`](crate::LogEntry), renders it through the active
/// [`Formatter`], and writes each rendered line to every registered sink in
/// registration order.
///
/// # Lifecycle
///
/// A fresh registry is deliberately quiet: no sinks, no filter overrides,
/// default level [`Level::Off`], annotations disabled, pretty formatter
/// preselected. [`setup_filters`](Self::setup_filters) may be called at any
/// time to (re)configure levels without touching sinks or the formatter;
/// [`reset`](Self::reset) returns everything to the fresh state and exists
/// for test isolation, not production reconfiguration.
///
/// Construct registries directly for dependency injection, or use the
/// process-wide handle from [`global()`](crate::global).
///
/// # Concurrency
///
/// All operations are synchronous and safe to call from any number of
/// threads. Configuration is read under a shared lock and replaced
/// wholesale under an exclusive one. The write path holds the sink list's
/// lock across the whole fan-out of one entry, so a multi-line entry is
/// written contiguously to every sink; ordering of entries *between*
/// threads is not otherwise specified. Indentation and metadata are
/// partitioned per calling thread and never leak across threads.
///
/// # Examples
///
/// ```
/// use logging::{ChannelRegistry, Level};
/// use logging_sink::MemorySink;
///
/// let registry = ChannelRegistry::new();
/// registry.setup_filters("MAIN:debug", "warning")?;
///
/// let sink = MemorySink::new();
/// let capture = sink.handle();
/// registry.add_sink(sink);
///
/// if registry.is_enabled("MAIN", Level::Debug)? {
///     registry.log("MAIN", Level::Debug, "ready", None)?;
/// }
/// assert!(capture.contents().contains("ready"));
/// # Ok::<(), logging::LogError>(())
/// ```
pub struct ChannelRegistry {
    config: RwLock<Config>,
    sinks: Mutex<Vec<Box<dyn Sink>>>,
    context: ThreadContextMap,
}

impl ChannelRegistry {
    /// Creates a registry in the unconfigured state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RwLock::new(Config::unconfigured()),
            sinks: Mutex::new(Vec::new()),
            context: ThreadContextMap::new(),
        }
    }

    /// Replaces the filter configuration from a spec string and a default
    /// level.
    ///
    /// Validation happens before any mutation: on error the prior
    /// configuration is untouched. Sinks, formatter, and annotations are
    /// never affected, so levels can be adjusted mid-run.
    pub fn setup_filters(&self, filter_spec: &str, default_level_spec: &str) -> LogResult<()> {
        let filters = FilterConfig::parse(filter_spec, default_level_spec)?;
        self.write_config().filters = filters;
        Ok(())
    }

    /// Appends a sink to the ordered output list.
    ///
    /// Sinks are written in registration order and are never removed
    /// individually; only [`reset`](Self::reset) clears the list. The sink
    /// is treated as open for the registry's lifetime.
    pub fn add_sink(&self, sink: impl Sink + 'static) {
        self.lock_sinks().push(Box::new(sink));
    }

    /// Atomically swaps the active formatter.
    pub fn set_formatter(&self, formatter: impl Formatter + 'static) {
        self.write_config().formatter = Some(Arc::new(formatter));
    }

    /// Removes the active formatter, making [`log`](Self::log) inert.
    ///
    /// Exists for teardown ordering: a guard that fires after the owner has
    /// dismantled logging should be a no-op rather than a crash.
    pub fn clear_formatter(&self) {
        self.write_config().formatter = None;
    }

    /// Enables thread-id annotation on rendered entries.
    pub fn enable_thread_id(&self) {
        self.write_config().thread_id = true;
    }

    /// Disables thread-id annotation on rendered entries.
    pub fn disable_thread_id(&self) {
        self.write_config().thread_id = false;
    }

    /// Reports whether thread-id annotation is enabled.
    #[must_use]
    pub fn thread_id_enabled(&self) -> bool {
        self.read_config().thread_id
    }

    /// Enables rendering of per-thread metadata on entries.
    pub fn enable_metadata(&self) {
        self.write_config().metadata = true;
    }

    /// Disables rendering of per-thread metadata on entries.
    pub fn disable_metadata(&self) {
        self.write_config().metadata = false;
    }

    /// Reports whether metadata rendering is enabled.
    #[must_use]
    pub fn metadata_enabled(&self) -> bool {
        self.read_config().metadata
    }

    /// Sets the process-wide service label stamped on every entry from now
    /// on. An empty name clears the label.
    pub fn set_service_name(&self, name: &str) {
        self.write_config().service_name = if name.is_empty() {
            None
        } else {
            Some(name.to_owned())
        };
    }

    /// Returns the configured service label, if any.
    #[must_use]
    pub fn service_name(&self) -> Option<String> {
        self.read_config().service_name.clone()
    }

    /// Reports whether a statement on `channel` at `level` would pass the
    /// filter.
    ///
    /// This is the check call sites run *before* building a message, so a
    /// filtered-out statement costs no formatting work. Requesting
    /// [`Level::Off`] is a programming error and fails rather than
    /// returning `false`.
    pub fn is_enabled(&self, channel: &str, level: Level) -> LogResult<bool> {
        if level == Level::Off {
            return Err(LogError::OffLevel);
        }
        Ok(self.read_config().filters.enabled_for(channel, level))
    }

    /// Renders and writes one statement to every sink.
    ///
    /// No filtering happens here: callers are expected to have consulted
    /// [`is_enabled`](Self::is_enabled) first. The statement is stamped
    /// with the current timestamp, the calling thread's indentation and
    /// identity, and the configured service name, then rendered by the
    /// active formatter and written line by line to every sink in
    /// registration order.
    ///
    /// Logging at [`Level::Off`] fails. With no formatter configured the
    /// call is a deliberate no-op. Sink write failures are best-effort:
    /// each sink gets its chance and errors are swallowed.
    pub fn log(
        &self,
        channel: &str,
        level: Level,
        message: &str,
        fields: Option<Fields>,
    ) -> LogResult<()> {
        self.log_entry(channel, level, message, None, fields)
    }

    /// Like [`log`](Self::log), with a validated classification code
    /// attached to the entry.
    ///
    /// The code is rendered into the pretty header and as the structured
    /// `log_code` field.
    pub fn log_with_code(
        &self,
        channel: &str,
        level: Level,
        code: &str,
        message: &str,
        fields: Option<Fields>,
    ) -> LogResult<()> {
        let code: LogCode = code.parse()?;
        self.log_entry(channel, level, message, Some(code), fields)
    }

    fn log_entry(
        &self,
        channel: &str,
        level: Level,
        message: &str,
        code: Option<LogCode>,
        fields: Option<Fields>,
    ) -> LogResult<()> {
        if level == Level::Off {
            return Err(LogError::OffLevel);
        }

        let (formatter, service_name, thread_id, metadata_enabled) = {
            let config = self.read_config();
            let Some(formatter) = config.formatter.clone() else {
                return Ok(());
            };
            (
                formatter,
                config.service_name.clone(),
                config.thread_id,
                config.metadata,
            )
        };

        let entry = LogEntry::new(
            channel,
            level,
            message,
            code,
            fields.unwrap_or_default(),
            service_name,
            self.context.current_indent(),
        );

        let metadata = if metadata_enabled {
            self.context.snapshot_metadata()
        } else {
            None
        };
        let state = RenderState {
            thread_id,
            metadata: metadata.as_ref(),
        };
        let lines = formatter.format_entry(&entry, &state);

        // One lock across the whole fan-out keeps the entry's lines
        // contiguous on every sink.
        let mut sinks = self.lock_sinks();
        for line in &lines {
            for sink in sinks.iter_mut() {
                let _ = sink.write_line(line);
            }
        }
        Ok(())
    }

    /// Adds one level of indentation for the calling thread.
    pub fn indent(&self) {
        self.context.indent();
    }

    /// Removes one level of indentation for the calling thread; a no-op at
    /// zero or for an unknown thread.
    pub fn deindent(&self) {
        self.context.deindent();
    }

    /// Returns the calling thread's indentation depth.
    #[must_use]
    pub fn current_indent(&self) -> u32 {
        self.context.current_indent()
    }

    /// Inserts or replaces a metadata entry for the calling thread.
    pub fn add_metadata(&self, key: &str, value: Value) {
        self.context.add_metadata(key, value);
    }

    /// Removes a metadata entry for the calling thread; absent keys are a
    /// no-op.
    pub fn remove_metadata(&self, key: &str) {
        self.context.remove_metadata(key);
    }

    /// Empties the calling thread's metadata map.
    pub fn clear_metadata(&self) {
        self.context.clear_metadata();
    }

    /// Returns an owned snapshot of the calling thread's metadata.
    #[must_use]
    pub fn snapshot_metadata(&self) -> Option<Fields> {
        self.context.snapshot_metadata()
    }

    /// Returns the registry to the unconfigured state.
    ///
    /// Clears sinks and filter overrides, restores the default level to
    /// [`Level::Off`] and the pretty formatter, drops the service name and
    /// both annotation toggles, and clears the *calling thread's own*
    /// indentation and metadata; other threads' context is theirs to
    /// unwind. Intended for test isolation.
    pub fn reset(&self) {
        *self.write_config() = Config::unconfigured();
        self.lock_sinks().clear();
        self.context.clear_current_thread();
    }

    fn read_config(&self) -> std::sync::RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(|poisoned| {
            // Config writes are plain assignments; a poisoned lock still
            // holds a coherent value.
            poisoned.into_inner()
        })
    }

    fn write_config(&self) -> std::sync::RwLockWriteGuard<'_, Config> {
        self.config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_sinks(&self) -> std::sync::MutexGuard<'_, Vec<Box<dyn Sink>>> {
        self.sinks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the process-wide registry handle.
///
/// The handle is created on first use and lives for the remainder of the
/// process. Prefer constructing a [`ChannelRegistry`] and injecting it
/// where ownership is clear; the global exists for call sites that have no
/// path to a shared instance, and for tests it pairs with
/// [`ChannelRegistry::reset`].
#[must_use]
pub fn global() -> &'static ChannelRegistry {
    static GLOBAL: OnceLock<ChannelRegistry> = OnceLock::new();
    GLOBAL.get_or_init(ChannelRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging_sink::MemorySink;

    fn capture(registry: &ChannelRegistry) -> logging_sink::MemoryHandle {
        let sink = MemorySink::new();
        let handle = sink.handle();
        registry.add_sink(sink);
        handle
    }

    #[test]
    fn fresh_registry_is_quiet() {
        let registry = ChannelRegistry::new();
        assert!(!registry.is_enabled("ANY", Level::Fatal).expect("valid level"));
        assert!(!registry.thread_id_enabled());
        assert!(!registry.metadata_enabled());
        assert!(registry.service_name().is_none());
    }

    #[test]
    fn is_enabled_rejects_off() {
        let registry = ChannelRegistry::new();
        assert!(matches!(
            registry.is_enabled("ANY", Level::Off),
            Err(LogError::OffLevel)
        ));
    }

    #[test]
    fn log_rejects_off() {
        let registry = ChannelRegistry::new();
        assert!(matches!(
            registry.log("ANY", Level::Off, "nope", None),
            Err(LogError::OffLevel)
        ));
    }

    #[test]
    fn log_without_formatter_is_inert() {
        let registry = ChannelRegistry::new();
        let handle = capture(&registry);
        registry.clear_formatter();

        registry
            .log("MAIN", Level::Info, "dropped", None)
            .expect("no-op succeeds");
        assert!(handle.contents().is_empty());
    }

    #[test]
    fn bad_spec_leaves_prior_config() {
        let registry = ChannelRegistry::new();
        registry
            .setup_filters("MAIN:debug", "info")
            .expect("valid spec");
        assert!(registry
            .setup_filters("MAIN:debug,BROKEN", "info")
            .is_err());

        assert!(registry.is_enabled("MAIN", Level::Debug).expect("valid"));
        assert!(registry.is_enabled("OTHER", Level::Info).expect("valid"));
    }

    #[test]
    fn log_writes_to_sinks_in_registration_order() {
        let registry = ChannelRegistry::new();
        let first = capture(&registry);
        let second = capture(&registry);
        registry.setup_filters("", "debug").expect("valid spec");

        registry
            .log("MAIN", Level::Info, "fan out", None)
            .expect("log succeeds");

        assert!(first.contents().contains("fan out"));
        assert!(second.contents().contains("fan out"));
    }

    #[test]
    fn service_name_round_trips_and_clears() {
        let registry = ChannelRegistry::new();
        registry.set_service_name("gateway");
        assert_eq!(registry.service_name().as_deref(), Some("gateway"));
        registry.set_service_name("");
        assert!(registry.service_name().is_none());
    }

    #[test]
    fn log_with_code_rejects_malformed_codes() {
        let registry = ChannelRegistry::new();
        registry.setup_filters("", "debug").expect("valid spec");
        assert!(matches!(
            registry.log_with_code("MAIN", Level::Info, "<bad>", "msg", None),
            Err(LogError::Code(_))
        ));
    }

    #[test]
    fn reset_restores_the_unconfigured_state() {
        let registry = ChannelRegistry::new();
        let handle = capture(&registry);
        registry.setup_filters("MAIN:debug", "info").expect("valid");
        registry.enable_thread_id();
        registry.enable_metadata();
        registry.set_service_name("svc");
        registry.indent();

        registry.reset();

        assert!(!registry.is_enabled("MAIN", Level::Fatal).expect("valid"));
        assert!(!registry.thread_id_enabled());
        assert!(!registry.metadata_enabled());
        assert!(registry.service_name().is_none());
        assert_eq!(registry.current_indent(), 0);

        // Sinks are gone: a fully-enabled log call lands nowhere.
        registry.setup_filters("", "debug").expect("valid");
        registry
            .log("MAIN", Level::Info, "after reset", None)
            .expect("log succeeds");
        assert!(handle.contents().is_empty());
    }

    #[test]
    fn global_returns_one_instance() {
        let a = global() as *const ChannelRegistry;
        let b = global() as *const ChannelRegistry;
        assert_eq!(a, b);
    }
}
