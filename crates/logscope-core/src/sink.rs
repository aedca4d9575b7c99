//! Output sinks attached to loggers

use crate::format::{RecordFormatter, SimpleFormatter};
use crate::record::{LogRecord, RecordLog};
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// An output destination attached to a logger
pub trait Sink: Send + Sync {
    /// Receive one record
    fn publish(&self, record: &LogRecord);

    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Whether this sink writes to the console; console sinks are the ones a
    /// capture scope detaches
    fn is_console(&self) -> bool {
        false
    }
}

/// Shared handle to a sink; identity is the shared allocation
pub type SinkRef = Arc<dyn Sink>;

/// True if both handles refer to the same sink instance
pub fn same_sink(a: &SinkRef, b: &SinkRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Console-writing sink
pub struct ConsoleSink {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
    formatter: Box<dyn RecordFormatter>,
}

impl ConsoleSink {
    /// A console sink writing to stderr
    pub fn stderr(name: impl Into<String>) -> Self {
        Self::with_writer(name, std::io::stderr())
    }

    /// A console sink writing to an arbitrary writer
    pub fn with_writer(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(Box::new(writer)),
            formatter: Box::new(SimpleFormatter),
        }
    }

    pub fn with_formatter(mut self, formatter: impl RecordFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn into_ref(self) -> SinkRef {
        Arc::new(self)
    }
}

impl Sink for ConsoleSink {
    fn publish(&self, record: &LogRecord) {
        let line = self.formatter.format(record);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // Console output is best effort
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_console(&self) -> bool {
        true
    }
}

/// Non-console sink appending every record to a `RecordLog`
pub struct MemorySink {
    name: String,
    log: RecordLog,
}

impl MemorySink {
    pub fn new(name: impl Into<String>, log: RecordLog) -> Self {
        Self {
            name: name.into(),
            log,
        }
    }

    pub fn into_ref(self) -> SinkRef {
        Arc::new(self)
    }
}

impl Sink for MemorySink {
    fn publish(&self, record: &LogRecord) {
        self.log.push(record.clone());
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_sink_writes_formatted_line() {
        let buf = SharedBuf::default();
        let sink = ConsoleSink::with_writer("console", buf.clone());

        sink.publish(&LogRecord::new("Operator", Level::Info, "started"));

        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "INFO Operator: started\n");
        assert!(sink.is_console());
    }

    #[test]
    fn test_memory_sink_is_not_console() {
        let log = RecordLog::new();
        let sink = MemorySink::new("memory", log.clone());

        sink.publish(&LogRecord::new("Operator", Level::Info, "started"));

        assert!(!sink.is_console());
        assert_eq!(log.messages(), vec!["started".to_string()]);
    }

    #[test]
    fn test_same_sink_is_identity() {
        let a = MemorySink::new("a", RecordLog::new()).into_ref();
        let b = MemorySink::new("a", RecordLog::new()).into_ref();

        assert!(same_sink(&a, &a.clone()));
        assert!(!same_sink(&a, &b));
    }
}
