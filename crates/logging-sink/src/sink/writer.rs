use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

use partition_log::{MessageSink, Partition, Severity, SinkError};

use crate::format::RecordFormat;
use crate::line_mode::LineMode;

struct State<W> {
    writer: W,
    format: RecordFormat,
    line_mode: LineMode,
}

/// Sink that renders records into an [`io::Write`] target.
///
/// The writer, the [`RecordFormat`], and the [`LineMode`] sit behind one
/// mutex, so each record is written as a single uninterrupted unit even when
/// many threads log at once. The writer is flushed after every record.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use partition_log::{Logger, Severity};
/// use partition_log_sink::WriterSink;
///
/// let sink = Arc::new(WriterSink::new(Vec::new()));
/// let logger = Logger::new(Arc::new(Severity::Info), sink.clone());
/// logger.warn("net").append("slow peer");
///
/// let output = sink.with_writer(|buffer| String::from_utf8(buffer.clone()).unwrap()).unwrap();
/// assert_eq!(output, "net [WARN] slow peer\n");
/// ```
pub struct WriterSink<W> {
    state: Mutex<State<W>>,
}

impl<W> WriterSink<W> {
    /// Creates a sink with the default format and newline-terminated records.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_parts(writer, RecordFormat::default(), LineMode::WithNewline)
    }

    /// Creates a sink from an explicit format and line mode.
    #[must_use]
    pub fn with_parts(writer: W, format: RecordFormat, line_mode: LineMode) -> Self {
        Self {
            state: Mutex::new(State {
                writer,
                format,
                line_mode,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<W>>, SinkError> {
        self.state.lock().map_err(|_| SinkError::Poisoned)
    }

    /// Replaces the record format for subsequent writes.
    pub fn set_format(&self, format: RecordFormat) -> Result<(), SinkError> {
        self.lock()?.format = format;
        Ok(())
    }

    /// Returns a copy of the current record format.
    pub fn format(&self) -> Result<RecordFormat, SinkError> {
        Ok(self.lock()?.format.clone())
    }

    /// Updates the [`LineMode`] used for subsequent writes.
    pub fn set_line_mode(&self, line_mode: LineMode) -> Result<(), SinkError> {
        self.lock()?.line_mode = line_mode;
        Ok(())
    }

    /// Returns the current [`LineMode`].
    pub fn line_mode(&self) -> Result<LineMode, SinkError> {
        Ok(self.lock()?.line_mode)
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> Result<R, SinkError> {
        Ok(f(&mut self.lock()?.writer))
    }

    /// Consumes the sink and returns the wrapped writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.state
            .into_inner()
            .map(|state| state.writer)
            .map_err(|_| SinkError::Poisoned)
    }
}

impl<W> WriterSink<W>
where
    W: Write,
{
    /// Flushes the current writer and swaps in `writer`, returning the
    /// previous one.
    ///
    /// Both steps happen under one lock. When the flush fails the sink keeps
    /// the current writer and the error is returned.
    pub fn replace_writer(&self, writer: W) -> Result<W, SinkError> {
        let mut state = self.lock()?;
        state.writer.flush()?;
        Ok(std::mem::replace(&mut state.writer, writer))
    }

    fn write_record(
        state: &mut State<W>,
        partition: &Partition,
        severity: Severity,
        text: &str,
    ) -> io::Result<()> {
        let mut line = state.format.render(partition, severity, text);
        if state.line_mode.append_newline() {
            line.push('\n');
        }
        state.writer.write_all(line.as_bytes())?;
        state.writer.flush()
    }
}

impl<W> MessageSink for WriterSink<W>
where
    W: Write + Send,
{
    fn accept_message(
        &self,
        partition: &Partition,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError> {
        let mut state = self.lock()?;
        Self::write_record(&mut state, partition, severity, text)?;
        Ok(())
    }
}

impl<W> std::fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: &WriterSink<Vec<u8>>) -> String {
        sink.with_writer(|buffer| String::from_utf8(buffer.clone()).expect("utf-8"))
            .expect("lock")
    }

    #[test]
    fn records_end_with_newline_by_default() {
        let sink = WriterSink::new(Vec::new());
        let net = Partition::from("net");
        sink.accept_message(&net, Severity::Info, "up").expect("write");
        sink.accept_message(&net, Severity::Error, "down").expect("write");

        assert_eq!(output(&sink), "net [INFO] up\nnet [ERROR] down\n");
    }

    #[test]
    fn without_newline_preserves_output() {
        let sink = WriterSink::with_parts(
            Vec::new(),
            RecordFormat::default(),
            LineMode::WithoutNewline,
        );
        sink.accept_message(&Partition::from("net"), Severity::Info, "ready")
            .expect("write");
        assert_eq!(sink.into_inner().expect("inner"), b"net [INFO] ready".to_vec());
    }

    #[test]
    fn format_changes_apply_to_later_records() {
        let sink = WriterSink::new(Vec::new());
        let net = Partition::from("net");
        sink.accept_message(&net, Severity::Info, "one").expect("write");
        sink.set_format(RecordFormat::new(Some("peer"), false))
            .expect("lock");
        sink.accept_message(&net, Severity::Info, "two").expect("write");

        assert_eq!(output(&sink), "net [INFO] one\npeer net [INFO] two\n");
        assert_eq!(sink.format().expect("lock").peer_id(), Some("peer"));
    }

    #[test]
    fn replace_writer_returns_previous() {
        let sink = WriterSink::new(Vec::new());
        sink.accept_message(&Partition::from("net"), Severity::Warn, "old")
            .expect("write");
        let previous = sink.replace_writer(Vec::new()).expect("lock");
        assert_eq!(previous, b"net [WARN] old\n".to_vec());
        assert_eq!(output(&sink), "");
    }

    #[test]
    fn failed_flush_keeps_current_writer() {
        #[derive(Debug)]
        struct Stuck {
            name: &'static str,
        }

        impl Write for Stuck {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                if self.name == "stuck" {
                    Err(io::Error::other("flush failed"))
                } else {
                    Ok(())
                }
            }
        }

        let sink = WriterSink::new(Stuck { name: "stuck" });
        let err = sink
            .replace_writer(Stuck { name: "next" })
            .unwrap_err();
        assert!(matches!(err, SinkError::Io(_)));
        assert_eq!(sink.with_writer(|writer| writer.name).expect("lock"), "stuck");
    }

    #[test]
    fn writer_errors_surface_as_io() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink = WriterSink::new(Broken);
        let err = sink
            .accept_message(&Partition::from("net"), Severity::Info, "x")
            .unwrap_err();
        assert!(matches!(err, SinkError::Io(ref io) if io.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn line_mode_can_be_switched() {
        let sink = WriterSink::new(Vec::<u8>::new());
        sink.set_line_mode(LineMode::WithoutNewline).expect("lock");
        assert_eq!(sink.line_mode().expect("lock"), LineMode::WithoutNewline);
    }
}
