//! Record rendering for console output and assertion messages

use crate::record::LogRecord;

/// Renders a record to a human-readable line
pub trait RecordFormatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
}

/// Default formatter: `LEVEL logger: message [failure]`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFormatter;

impl RecordFormatter for SimpleFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut line = format!("{} {}: {}", record.level, record.logger, record.message);
        if let Some(failure) = &record.failure {
            line.push_str(&format!(" [{}]", failure));
        }
        line
    }
}
