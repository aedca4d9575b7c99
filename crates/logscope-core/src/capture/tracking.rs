//! Message tracking policy

use crate::record::{LogRecord, RecordLog};
use std::collections::BTreeSet;

/// Which emitted records a capture scope collects for the post-scope check
#[derive(Clone, Debug, Default)]
pub enum TrackingMode {
    /// Collect nothing
    #[default]
    Untracked,
    /// Collect records whose message is one of `messages`
    Specific {
        messages: BTreeSet<String>,
        into: RecordLog,
    },
    /// Collect every record, whatever its message
    All { into: RecordLog },
}

impl TrackingMode {
    /// Track only records whose message is in `messages`
    pub fn specific<I, S>(into: RecordLog, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TrackingMode::Specific {
            messages: messages.into_iter().map(Into::into).collect(),
            into,
        }
    }

    /// Track every record
    pub fn all(into: RecordLog) -> Self {
        TrackingMode::All { into }
    }

    /// Whether `record` belongs in the destination
    pub fn should_track(&self, record: &LogRecord) -> bool {
        match self {
            TrackingMode::Untracked => false,
            TrackingMode::Specific { messages, .. } => messages.contains(&record.message),
            TrackingMode::All { .. } => true,
        }
    }

    /// The collection bound by `Specific` or `All`
    pub fn destination(&self) -> Option<&RecordLog> {
        match self {
            TrackingMode::Untracked => None,
            TrackingMode::Specific { into, .. } | TrackingMode::All { into, .. } => Some(into),
        }
    }

    /// Stop collecting `message` from now on
    ///
    /// Only narrows a `Specific` set; `All` keeps collecting everything.
    pub fn untrack(&mut self, message: &str) {
        if let TrackingMode::Specific { messages, .. } = self {
            messages.remove(message);
        }
    }
}
