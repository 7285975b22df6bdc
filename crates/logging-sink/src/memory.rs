use std::io;
use std::sync::{Arc, Mutex};

use crate::Sink;

/// Sink that captures rendered lines into a shared in-memory buffer.
///
/// Registering a sink moves it into the registry, so a plain buffer-backed
/// sink would take its contents out of reach. `MemorySink` keeps the buffer
/// behind an [`Arc`] and hands out a [`MemoryHandle`] that stays readable
/// after the sink itself is gone. This is the capture mechanism the
/// workspace's integration tests use to assert on logger output.
///
/// # Examples
///
/// ```
/// use logging_sink::{MemorySink, Sink};
///
/// let mut sink = MemorySink::new();
/// let handle = sink.handle();
///
/// sink.write_line("captured\n")?;
/// drop(sink);
///
/// assert_eq!(handle.contents(), "captured\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    /// Creates an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that reads the captured output, independent of the
    /// sink's ownership.
    #[must_use]
    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("capture buffer poisoned"))?;
        buffer.push_str(line);
        Ok(())
    }
}

/// Read-side handle to a [`MemorySink`]'s captured output.
#[derive(Clone, Debug)]
pub struct MemoryHandle {
    buffer: Arc<Mutex<String>>,
}

impl MemoryHandle {
    /// Returns a copy of everything captured so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |buf| buf.clone())
    }

    /// Returns the captured output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discards everything captured so far.
    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_outlives_sink() {
        let mut sink = MemorySink::new();
        let handle = sink.handle();

        sink.write_line("one\n").expect("write succeeds");
        sink.write_line("two\n").expect("write succeeds");
        drop(sink);

        assert_eq!(handle.lines(), vec!["one", "two"]);
    }

    #[test]
    fn clear_discards_captured_output() {
        let mut sink = MemorySink::new();
        let handle = sink.handle();

        sink.write_line("gone\n").expect("write succeeds");
        handle.clear();

        assert!(handle.contents().is_empty());
    }

    #[test]
    fn handles_share_one_buffer() {
        let mut sink = MemorySink::new();
        let first = sink.handle();
        let second = first.clone();

        sink.write_line("shared\n").expect("write succeeds");

        assert_eq!(first.contents(), second.contents());
    }
}
