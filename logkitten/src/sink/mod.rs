//! Destinations for formatted log lines.
//!
//! # Report Trait
//!
//! Console and operator console sinks implement [`Report`], which receives a fully formatted
//! line. Custom sinks, such as a driver station bridge on the robot, are plugged in by implementing
//! this trait.
//!
//! # Built-in Sinks
//!
//! - [`StdoutReporter`] - Writes lines to standard output, the default console sink
//! - [`MemoryReporter`] - Keeps lines in memory, for tests and operator console mocks
//! - [`FileSink`] - The append-only log file owned by each [`Logger`](crate::Logger)

mod file;
mod memory;
mod stdout;

use core::fmt::Debug;

pub use file::FileSink;
pub use memory::MemoryReporter;
pub use stdout::StdoutReporter;

/// A sink that accepts already formatted log lines.
///
/// Lines passed in end with the ` \n` terminator of the log format, implementations forward them
/// verbatim.
///
/// # Examples
///
/// ```rust
/// use logkitten::sink::Report;
///
/// #[derive(Debug)]
/// struct DriverStation;
///
/// impl Report for DriverStation {
///     fn report(&self, line: &str) {
///         // Hand the line to the operator console here.
///         let _ = line;
///     }
/// }
/// ```
pub trait Report: Debug + Send + Sync {
    /// Delivers a single line.
    ///
    /// Failures must be swallowed, a sink has nowhere to report its own errors.
    fn report(&self, line: &str);
}
