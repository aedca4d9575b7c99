//! Console sink removal and restoration

use crate::logger::Logger;
use crate::sink::SinkRef;

/// Console sinks removed from a logger, with their original positions
#[derive(Clone, Default)]
pub struct SinkList {
    entries: Vec<(usize, SinkRef)>,
}

impl SinkList {
    /// The removed sinks in their original relative order
    pub fn sinks(&self) -> Vec<SinkRef> {
        self.entries.iter().map(|(_, sink)| sink.clone()).collect()
    }

    /// Names of the removed sinks, in original order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(_, sink)| sink.name().to_string())
            .collect()
    }

    /// Number of removed sinks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no console sink was removed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for SinkList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Detach every console sink from `logger`, leaving other sinks attached
pub fn remove_console_sinks(logger: &Logger) -> SinkList {
    let entries: Vec<(usize, SinkRef)> = logger
        .sinks()
        .into_iter()
        .enumerate()
        .filter(|(_, sink)| sink.is_console())
        .collect();

    for (_, sink) in &entries {
        logger.detach_sink(sink);
    }

    SinkList { entries }
}

/// Reattach previously removed sinks at their original positions
///
/// Entries are inserted in ascending position order, which reproduces the
/// original list exactly when nothing else changed in between.
pub fn restore_console_sinks(logger: &Logger, saved: &SinkList) {
    for (index, sink) in &saved.entries {
        logger.insert_sink(*index, sink.clone());
    }
}
