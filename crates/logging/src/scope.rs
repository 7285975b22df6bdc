//! crates/logging/src/scope.rs
//! RAII guards pairing enter/exit mutations against the registry.
//!
//! All four guards bind a mutation to a lexical scope: the exit action runs
//! exactly once on every scope-exit path, including unwinding, and never
//! panics. Errors from log calls made inside `Drop` are swallowed, so a
//! failing exit message can never cause a sibling guard's exit action to be
//! skipped. Guards nest arbitrarily, including across recursive calls on
//! one thread.

use std::time::Instant;

use crate::entry::Fields;
use crate::error::LogResult;
use crate::level::Level;
use crate::registry::ChannelRegistry;

/// Nanosecond thresholds at which the timer switches display units.
const MICROS_THRESHOLD: u128 = 1_000;
const MILLIS_THRESHOLD: u128 = 1_000_000;
const SECONDS_THRESHOLD: u128 = 100_000_000;

/// Guard that logs a `Start:`/`End:` pair around a scope.
///
/// Construction logs `"Start: <msg>"` on the given channel/level and drop
/// logs `"End: <msg>"`. Unlike the ordinary log path, the guard performs
/// its own enablement check (call sites wrapping a scope do not pre-check)
/// and re-checks at exit, so a reconfiguration inside the scope takes
/// effect on the `End` line. One guard instance serves one purpose;
/// multiple blocks nest freely.
///
/// # Examples
///
/// ```
/// use logging::{ChannelRegistry, Level, ScopedBlock};
///
/// let registry = ChannelRegistry::new();
/// registry.setup_filters("", "debug")?;
/// {
///     let _block = ScopedBlock::new(&registry, "MAIN", Level::Trace, "load config")?;
///     // work happens between the Start and End entries
/// }
/// # Ok::<(), logging::LogError>(())
/// ```
#[must_use = "dropping the guard immediately logs the End entry"]
pub struct ScopedBlock<'a> {
    registry: &'a ChannelRegistry,
    channel: String,
    level: Level,
    message: String,
    fields: Option<Fields>,
}

impl<'a> ScopedBlock<'a> {
    /// Creates the guard and logs the `Start:` entry when enabled.
    ///
    /// Fails on [`Level::Off`], exactly like
    /// [`is_enabled`](ChannelRegistry::is_enabled).
    pub fn new(
        registry: &'a ChannelRegistry,
        channel: &str,
        level: Level,
        message: &str,
    ) -> LogResult<Self> {
        Self::with_fields(registry, channel, level, message, None)
    }

    /// Like [`new`](Self::new), attaching extra data to both the `Start`
    /// and `End` entries.
    pub fn with_fields(
        registry: &'a ChannelRegistry,
        channel: &str,
        level: Level,
        message: &str,
        fields: Option<Fields>,
    ) -> LogResult<Self> {
        let guard = Self {
            registry,
            channel: channel.to_owned(),
            level,
            message: message.to_owned(),
            fields,
        };
        if guard.registry.is_enabled(&guard.channel, guard.level)? {
            guard.registry.log(
                &guard.channel,
                guard.level,
                &format!("Start: {}", guard.message),
                guard.fields.clone(),
            )?;
        }
        Ok(guard)
    }
}

impl Drop for ScopedBlock<'_> {
    fn drop(&mut self) {
        if let Ok(true) = self.registry.is_enabled(&self.channel, self.level) {
            let _ = self.registry.log(
                &self.channel,
                self.level,
                &format!("End: {}", self.message),
                self.fields.take(),
            );
        }
    }
}

/// Guard that logs the scope's elapsed wall-clock time on exit.
///
/// The start instant is captured only when the channel/level is enabled at
/// construction; if still enabled at exit, the elapsed duration is logged
/// after the message with a unit scaled by magnitude: nanoseconds below
/// 1 000, microseconds from 1 000, milliseconds from 1 000 000, and seconds
/// from 100 000 000 (all thresholds nanosecond-denominated).
///
/// For the manually-queried variant, bind the guard to a name and call
/// [`current_duration_ns`](Self::current_duration_ns) before the scope
/// ends.
#[must_use = "dropping the guard immediately logs the elapsed time"]
pub struct ScopedTimer<'a> {
    registry: &'a ChannelRegistry,
    channel: String,
    level: Level,
    message: String,
    start: Option<Instant>,
}

impl<'a> ScopedTimer<'a> {
    /// Creates the guard, capturing the start time when enabled.
    ///
    /// Fails on [`Level::Off`].
    pub fn new(
        registry: &'a ChannelRegistry,
        channel: &str,
        level: Level,
        message: &str,
    ) -> LogResult<Self> {
        let start = if registry.is_enabled(channel, level)? {
            Some(Instant::now())
        } else {
            None
        };
        Ok(Self {
            registry,
            channel: channel.to_owned(),
            level,
            message: message.to_owned(),
            start,
        })
    }

    /// Returns the nanoseconds elapsed since construction, or zero when
    /// the timer never started because its channel/level was disabled.
    #[must_use]
    pub fn current_duration_ns(&self) -> u128 {
        self.start.map_or(0, |start| start.elapsed().as_nanos())
    }
}

/// Scales a nanosecond count into the human-friendly unit for its
/// magnitude.
fn format_duration(nanos: u128) -> String {
    if nanos >= SECONDS_THRESHOLD {
        format!("{:.3}s", nanos as f64 / 1e9)
    } else if nanos >= MILLIS_THRESHOLD {
        format!("{:.3}ms", nanos as f64 / 1e6)
    } else if nanos >= MICROS_THRESHOLD {
        format!("{:.3}us", nanos as f64 / 1e3)
    } else {
        format!("{nanos}ns")
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        let Some(start) = self.start else { return };
        if let Ok(true) = self.registry.is_enabled(&self.channel, self.level) {
            let elapsed = format_duration(start.elapsed().as_nanos());
            let _ = self.registry.log(
                &self.channel,
                self.level,
                &format!("{}{elapsed}", self.message),
                None,
            );
        }
    }
}

/// Guard that indents the calling thread for the duration of a scope.
///
/// The unconditional form always indents; the
/// [`when_enabled`](Self::when_enabled) form indents only when the given
/// channel/level passes the filter. The guard records whether it actually
/// incremented, so its exit mirrors its enter exactly even when
/// indentation was not applicable.
#[must_use = "dropping the guard immediately removes the indentation"]
pub struct ScopedIndent<'a> {
    registry: &'a ChannelRegistry,
    applied: bool,
}

impl<'a> ScopedIndent<'a> {
    /// Indents the calling thread unconditionally.
    pub fn new(registry: &'a ChannelRegistry) -> Self {
        registry.indent();
        Self {
            registry,
            applied: true,
        }
    }

    /// Indents the calling thread only when `channel`/`level` is enabled.
    ///
    /// Fails on [`Level::Off`].
    pub fn when_enabled(
        registry: &'a ChannelRegistry,
        channel: &str,
        level: Level,
    ) -> LogResult<Self> {
        let applied = registry.is_enabled(channel, level)?;
        if applied {
            registry.indent();
        }
        Ok(Self { registry, applied })
    }
}

impl Drop for ScopedIndent<'_> {
    fn drop(&mut self) {
        if self.applied {
            self.registry.deindent();
        }
    }
}

/// Guard that attaches metadata to the calling thread for a scope.
///
/// On exit the guard removes exactly the keys it added, never a full
/// clear, so nested guards touching different keys coexist. A nested
/// guard that reuses a key owned by an outer guard will remove it on its
/// own exit; prior values are not restored.
#[must_use = "dropping the guard immediately removes the metadata it added"]
pub struct ScopedMetadata<'a> {
    registry: &'a ChannelRegistry,
    keys: Vec<String>,
}

impl<'a> ScopedMetadata<'a> {
    /// Adds one metadata entry for the scope.
    pub fn new(registry: &'a ChannelRegistry, key: &str, value: serde_json::Value) -> Self {
        registry.add_metadata(key, value);
        Self {
            registry,
            keys: vec![key.to_owned()],
        }
    }

    /// Adds every entry of `fields` for the scope.
    pub fn with_fields(registry: &'a ChannelRegistry, fields: Fields) -> Self {
        let keys = fields.keys().cloned().collect();
        for (key, value) in fields {
            registry.add_metadata(&key, value);
        }
        Self { registry, keys }
    }
}

impl Drop for ScopedMetadata<'_> {
    fn drop(&mut self) {
        for key in &self.keys {
            self.registry.remove_metadata(key);
        }
    }
}
