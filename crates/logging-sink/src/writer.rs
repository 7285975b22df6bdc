use std::io::{self, Stderr, Stdout, Write};

use crate::Sink;

/// Sink backed by an arbitrary [`io::Write`] implementor.
///
/// Every line is written and then flushed immediately, matching the prompt
/// flush expectation of the sink contract: diagnostics must be visible as
/// soon as they are emitted, not when some downstream buffer happens to
/// fill.
///
/// # Examples
///
/// Collect rendered lines into a [`Vec<u8>`]:
///
/// ```
/// use logging_sink::{Sink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.write_line("first line\n")?;
/// sink.write_line("second line\n")?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output.lines().count(), 2);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W> {
    /// Creates a sink that writes rendered lines to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Returns a sink that writes to the process's standard output stream.
#[must_use]
pub fn stdout() -> WriterSink<Stdout> {
    WriterSink::new(io::stdout())
}

/// Returns a sink that writes to the process's standard error stream.
#[must_use]
pub fn stderr() -> WriterSink<Stderr> {
    WriterSink::new(io::stderr())
}
