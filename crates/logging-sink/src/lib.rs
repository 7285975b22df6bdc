#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging-sink` provides the output-side abstraction for the channel-log
//! workspace: a [`Sink`] is any destination that accepts an ordered sequence
//! of fully rendered text lines and flushes them promptly. The channel
//! registry in the `logging` crate owns a list of boxed sinks and fans every
//! rendered entry out to each of them in registration order.
//!
//! # Design
//!
//! Sinks receive *rendered* lines, never structured entries. Formatting is
//! the registry's concern; a sink's only job is to get bytes to their
//! destination in the order they were handed over. Each line passed to
//! [`Sink::write_line`] is already newline-terminated, so implementations
//! never append or strip terminators themselves.
//!
//! Three standard implementations cover the common destinations:
//!
//! - [`WriterSink`] wraps any [`io::Write`](std::io::Write) implementor and
//!   flushes after every line.
//! - [`stdout`] / [`stderr`] are `WriterSink` constructors for the standard
//!   streams.
//! - [`MemorySink`] captures output into a shared in-memory buffer whose
//!   [`handle`](MemorySink::handle) stays readable after the sink itself has
//!   been moved into a registry. Tests inspect logger output through it.
//!
//! # Invariants
//!
//! - A registered sink is treated as open for the registry's whole lifetime;
//!   nothing in this crate closes an underlying destination.
//! - Writes are best-effort from the registry's point of view: errors surface
//!   through [`io::Result`](std::io::Result) but the caller decides whether
//!   they matter.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer.

use std::io;

mod memory;
mod writer;

pub use memory::{MemoryHandle, MemorySink};
pub use writer::{WriterSink, stderr, stdout};

/// A writable destination for rendered log lines.
///
/// Implementors receive each line exactly as the formatter produced it,
/// newline terminator included, in the order the registry writes them. The
/// registry never closes a sink; destinations that need closing manage that
/// outside the logging core.
pub trait Sink: Send {
    /// Writes one rendered, newline-terminated line to the destination.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Flushes any buffered output to the destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
