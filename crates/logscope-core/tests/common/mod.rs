use logscope_core::{ConsoleSink, LoggerRef, LoggerRegistry, MemorySink, RecordLog, SinkRef};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Writer whose bytes can be read back after the sink is attached
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Create a logger with one console sink writing into a shared buffer
#[allow(dead_code)]
pub fn logger_with_console(registry: &LoggerRegistry, name: &str) -> (LoggerRef, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let logger = registry.resolve(name);
    logger.attach_sink(ConsoleSink::with_writer(format!("{name}-console"), buffer.clone()).into_ref());
    (logger, buffer)
}

/// Attach a memory sink and return the log it appends to
#[allow(dead_code)]
pub fn attach_memory(logger: &LoggerRef, name: &str) -> RecordLog {
    let log = RecordLog::new();
    logger.attach_sink(MemorySink::new(name, log.clone()).into_ref());
    log
}

/// Sink names in attachment order
#[allow(dead_code)]
pub fn sink_names(logger: &LoggerRef) -> Vec<String> {
    logger
        .sinks()
        .iter()
        .map(|s: &SinkRef| s.name().to_string())
        .collect()
}
