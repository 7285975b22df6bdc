//! crates/logging/src/filter.rs
//! Per-channel level overrides and the filter spec parser.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::level::{Level, ParseLevelError};

/// Per-channel level configuration with a default for unlisted channels.
///
/// Channel names are case-sensitive, caller-defined strings; no registration
/// step exists. The configuration is immutable once built; reconfiguration
/// replaces the whole value, so concurrent readers never observe a
/// half-updated mapping.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    channels: FxHashMap<String, Level>,
    default: Level,
}

impl FilterConfig {
    /// Configuration with no overrides and everything silenced.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            channels: FxHashMap::default(),
            default: Level::Off,
        }
    }

    /// Parses a filter spec and default level into a configuration.
    ///
    /// The spec is a comma-separated list of `CHANNEL:level` pairs, e.g.
    /// `"MAIN:debug,NET:warning"`. Each piece must contain exactly one
    /// colon and a level from the fixed vocabulary; any malformed piece
    /// fails the whole call, so a configuration is either fully valid or
    /// not produced at all. The empty spec is valid and yields no
    /// overrides.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{FilterConfig, Level};
    ///
    /// let config = FilterConfig::parse("MAIN:debug,NET:warning", "info")?;
    /// assert!(config.enabled_for("MAIN", Level::Debug));
    /// assert!(!config.enabled_for("NET", Level::Info));
    /// assert!(config.enabled_for("OTHER", Level::Info));
    /// # Ok::<(), logging::FilterSpecError>(())
    /// ```
    pub fn parse(filter_spec: &str, default_level_spec: &str) -> Result<Self, FilterSpecError> {
        let default = Level::from_str(default_level_spec)
            .map_err(|source| FilterSpecError::new(default_level_spec, Some(source)))?;

        let mut channels = FxHashMap::default();
        if filter_spec.is_empty() {
            return Ok(Self { channels, default });
        }

        for piece in filter_spec.split(',') {
            let mut parts = piece.split(':');
            let (Some(channel), Some(level_text), None) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(FilterSpecError::new(piece, None));
            };
            let level = Level::from_str(level_text)
                .map_err(|source| FilterSpecError::new(piece, Some(source)))?;
            channels.insert(channel.to_owned(), level);
        }

        Ok(Self { channels, default })
    }

    /// Returns the level configured for `channel`, falling back to the
    /// default for unlisted channels.
    #[must_use]
    pub fn level_for(&self, channel: &str) -> Level {
        self.channels.get(channel).copied().unwrap_or(self.default)
    }

    /// Returns the default level used for unlisted channels.
    #[must_use]
    pub const fn default_level(&self) -> Level {
        self.default
    }

    /// Reports whether a statement at `level` on `channel` passes the
    /// filter. Ordinal comparison is the sole rule: the configured level
    /// must be at least as verbose as the requested one.
    #[must_use]
    pub fn enabled_for(&self, channel: &str, level: Level) -> bool {
        self.level_for(channel) >= level
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::silent()
    }
}

/// Error produced when a filter spec entry cannot be parsed.
///
/// Retains the offending entry and, when the failure was an unparseable
/// level rather than a malformed pair, the underlying [`ParseLevelError`].
#[derive(Clone, Debug)]
pub struct FilterSpecError {
    entry: String,
    source: Option<ParseLevelError>,
}

impl FilterSpecError {
    fn new(entry: &str, source: Option<ParseLevelError>) -> Self {
        Self {
            entry: entry.to_owned(),
            source,
        }
    }

    /// Returns the spec entry that was rejected.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }
}

impl fmt::Display for FilterSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid filter spec entry [{}]", self.entry)
    }
}

impl std::error::Error for FilterSpecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
