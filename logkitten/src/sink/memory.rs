use std::sync::{Arc, Mutex, PoisonError};

use super::Report;

/// A sink that stores every reported line in memory.
///
/// Clones share the same storage, so a clone can be handed to a [`Logger`](crate::Logger) while
/// the test keeps the other to inspect what was reported.
///
/// # Examples
///
/// ```rust
/// use logkitten::sink::{MemoryReporter, Report};
///
/// let reporter = MemoryReporter::new();
/// let handle = reporter.clone();
///
/// reporter.report("WARN: auton:3: stalled \n");
/// assert_eq!(handle.lines(), ["WARN: auton:3: stalled \n"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
    /// Creates an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all lines reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns all lines reported so far.
    pub fn take(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}

impl Report for MemoryReporter {
    fn report(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
    }
}
