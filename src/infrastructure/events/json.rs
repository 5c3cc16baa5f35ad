//! JSON Audit Sink
//!
//! Writes audit events as NDJSON, one object per line.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use crate::domain::ports::{AuditEvent, AuditSink};

pub struct JsonAuditSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonAuditSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Append to a file, creating it and its parent directory if needed
    pub fn append_to(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(file))
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl AuditSink for JsonAuditSink {
    fn record(&self, event: AuditEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to encode audit event");
                return;
            }
        };
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!(error = %e, action = %event.action, "audit event not delivered");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::AuditAction;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_event() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = JsonAuditSink::with_writer(TestWriter {
            buffer: buffer.clone(),
        });

        sink.record(AuditEvent::new(
            AuditAction::AppraisalCreated,
            "Asha",
            "apr-1 started for March 2025",
        ));
        sink.record(AuditEvent::new(
            AuditAction::AppraisalSubmitted,
            "Asha",
            "apr-1 submitted",
        ));

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"action\":\"appraisal_created\""));
        assert!(lines[0].contains("\"module\":\"Appraisal\""));
        assert!(lines[1].contains("\"actorName\":\"Asha\""));
    }

    #[test]
    fn write_failures_are_swallowed() {
        let sink = JsonAuditSink::with_writer(BrokenWriter);
        sink.record(AuditEvent::new(AuditAction::CycleActivated, "HR", "cyc-2025-03"));
    }

    #[test]
    fn appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("audit.ndjson");
        {
            let sink = JsonAuditSink::append_to(&path).unwrap();
            sink.record(AuditEvent::new(AuditAction::CycleCreated, "HR", "one"));
        }
        {
            let sink = JsonAuditSink::append_to(&path).unwrap();
            sink.record(AuditEvent::new(AuditAction::CycleActivated, "HR", "two"));
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
