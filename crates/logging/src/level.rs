//! crates/logging/src/level.rs
//! Ordered severity scale and its parsing/display rules.

use std::fmt;
use std::str::FromStr;

/// Severity level of a log statement or a channel filter.
///
/// Levels are totally ordered by verbosity: a larger level is more verbose.
/// Filtering compares ordinals and nothing else: a channel configured at
/// level `a` emits a statement at level `b` iff `a >= b`.
///
/// [`Level::Off`] is a configuration-only sentinel: it is a valid *filter*
/// value (silencing a channel entirely) but never a valid *message*
/// severity. Logging at `Off` is rejected by the registry.
///
/// # Examples
///
/// ```
/// use logging::Level;
///
/// assert!(Level::Debug > Level::Info);
/// assert_eq!("warning".parse::<Level>()?, Level::Warning);
/// assert_eq!(Level::Debug3.as_str(), "debug3");
/// # Ok::<(), logging::ParseLevelError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Configuration-only sentinel that silences a channel.
    Off,
    /// Unrecoverable failures.
    Fatal,
    /// Recoverable failures.
    Error,
    /// Suspicious conditions that do not stop execution.
    Warning,
    /// High-level operational messages.
    Info,
    /// Call-flow tracing.
    Trace,
    /// General debugging detail.
    Debug,
    /// First extra debugging tier.
    Debug1,
    /// Second extra debugging tier.
    Debug2,
    /// Third extra debugging tier.
    Debug3,
    /// Fourth extra debugging tier.
    Debug4,
}

impl Level {
    /// Every level in ascending verbosity order.
    pub const ALL: [Self; 11] = [
        Self::Off,
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Trace,
        Self::Debug,
        Self::Debug1,
        Self::Debug2,
        Self::Debug3,
        Self::Debug4,
    ];

    /// Returns the lowercase full word used for display and parsing.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Debug1 => "debug1",
            Self::Debug2 => "debug2",
            Self::Debug3 => "debug3",
            Self::Debug4 => "debug4",
        }
    }

    /// Returns the fixed 4-character abbreviation used in compact headers.
    ///
    /// `Off` keeps a trailing space so every abbreviation occupies exactly
    /// four columns.
    #[must_use]
    pub const fn short_code(self) -> &'static str {
        match self {
            Self::Off => "OFF ",
            Self::Fatal => "FATL",
            Self::Error => "ERRR",
            Self::Warning => "WARN",
            Self::Info => "INFO",
            Self::Trace => "TRCE",
            Self::Debug => "DBUG",
            Self::Debug1 => "DBG1",
            Self::Debug2 => "DBG2",
            Self::Debug3 => "DBG3",
            Self::Debug4 => "DBG4",
        }
    }

    /// Returns the level's position on the verbosity scale (`Off` is 0).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns the level at the given ordinal, or `None` when out of range.
    ///
    /// The enumeration is closed, so unknown ordinals are unrepresentable
    /// rather than rendered through a fallback.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Off),
            1 => Some(Self::Fatal),
            2 => Some(Self::Error),
            3 => Some(Self::Warning),
            4 => Some(Self::Info),
            5 => Some(Self::Trace),
            6 => Some(Self::Debug),
            7 => Some(Self::Debug1),
            8 => Some(Self::Debug2),
            9 => Some(Self::Debug3),
            10 => Some(Self::Debug4),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Level`] from a string fails.
///
/// The offending input is retained so configuration errors can point at the
/// exact token that was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid log level [{}]", self.input)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses the fixed, case-sensitive level vocabulary.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "off" => Ok(Self::Off),
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "debug1" => Ok(Self::Debug1),
            "debug2" => Ok(Self::Debug2),
            "debug3" => Ok(Self::Debug3),
            "debug4" => Ok(Self::Debug4),
            _ => Err(ParseLevelError::new(input)),
        }
    }
}
