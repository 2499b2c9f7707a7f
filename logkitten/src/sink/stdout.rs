use std::io::Write;

use super::Report;

/// Implements [`Report`] by writing to standard output.
///
/// # Examples
///
/// ```rust
/// use logkitten::sink::{Report, StdoutReporter};
///
/// StdoutReporter::DEFAULT.report("Auto WARN: drive:12: low battery \n");
/// ```
#[derive(Debug, Default)]
pub struct StdoutReporter(());

impl StdoutReporter {
    /// A `const` version of `StdoutReporter::default()` to allow use as a `&'static`.
    pub const DEFAULT: Self = StdoutReporter(());
}

impl Report for StdoutReporter {
    fn report(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // this is a logger, ignore any errors writing
        let _ = stdout.write_all(line.as_bytes());
        let _ = stdout.flush();
    }
}
