#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a process-wide, thread-safe structured logging core. Log
//! statements are tagged with a caller-defined channel name and a severity
//! [`Level`], filtered against per-channel configuration, enriched with the
//! calling thread's context (indentation depth, identity, key/value
//! metadata) and a local timestamp, rendered through a pluggable
//! [`Formatter`], and fanned out to every registered
//! [`Sink`](logging_sink::Sink).
//!
//! # Design
//!
//! The [`ChannelRegistry`] is the single facade. Call sites first ask
//! [`is_enabled`](ChannelRegistry::is_enabled) and only build a message when
//! it passes; [`log`](ChannelRegistry::log) itself does no filtering, so a
//! filtered-out statement never pays formatting costs. The registry is
//! designed for explicit ownership (construct one and inject it); a
//! documented process-wide handle is available through [`global()`] for
//! call sites with no path to a shared instance.
//!
//! Rendering is a strategy: [`PrettyFormatter`] emits one greppable header-
//! prefixed line per message line and key/value pair, while
//! [`JsonFormatter`] emits exactly one structured record per entry. Scoped
//! state is managed by the RAII guards [`ScopedBlock`], [`ScopedTimer`],
//! [`ScopedIndent`], and [`ScopedMetadata`], whose exit actions run on
//! every scope-exit path.
//!
//! # Invariants
//!
//! - Filtering is ordinal comparison on [`Level`], nothing else; `off` is a
//!   configuration value and is rejected as a message severity.
//! - Reconfiguration is validate-then-swap: readers never observe a
//!   half-updated filter mapping, and a rejected spec leaves the previous
//!   configuration in place.
//! - Indentation and metadata are partitioned by calling-thread identity;
//!   two threads never observe each other's context.
//! - The write path keeps each entry's rendered lines contiguous on every
//!   sink; ordering of entries between threads is otherwise unspecified.
//!
//! # Errors
//!
//! Configuration mistakes ([`ParseLevelError`], [`FilterSpecError`],
//! [`InvalidLogCodeError`], logging at `off`) fail synchronously through
//! [`LogError`]. Lifecycle-ordering situations (no formatter configured,
//! unwinding context on a thread with none) are deliberate no-ops.
//!
//! # Examples
//!
//! ```
//! use logging::{ChannelRegistry, Level};
//! use logging_sink::MemorySink;
//!
//! let registry = ChannelRegistry::new();
//! registry.setup_filters("MAIN:debug,NET:warning", "info")?;
//!
//! let sink = MemorySink::new();
//! let capture = sink.handle();
//! registry.add_sink(sink);
//!
//! if registry.is_enabled("MAIN", Level::Debug)? {
//!     registry.log("MAIN", Level::Debug, "cache warmed", None)?;
//! }
//! assert!(capture.contents().contains("cache warmed"));
//! # Ok::<(), logging::LogError>(())
//! ```

mod code;
mod context;
mod entry;
mod error;
mod filter;
mod format;
mod level;
mod registry;
mod scope;

pub use code::{InvalidLogCodeError, LogCode, is_log_code};
pub use entry::{Fields, LogEntry};
pub use error::{LogError, LogResult};
pub use filter::{FilterConfig, FilterSpecError};
pub use format::{Formatter, JsonFormatter, PrettyFormatter, RenderState};
pub use level::{Level, ParseLevelError};
pub use registry::{ChannelRegistry, global};
pub use scope::{ScopedBlock, ScopedIndent, ScopedMetadata, ScopedTimer};
