//! The process-wide logger.
//!
//! Robot programs often want one logger for everything. It is built once, at startup, via
//! [`init`] and is afterwards reachable from anywhere through [`get`]. Its log file is named after
//! the startup time, `<log directory>/<timestamp>.log`, and its console lines carry no label.
//!
//! ```rust,no_run
//! use logkitten::{Severity, global};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let logger = global::init(global::builder().console_level(Severity::ERROR))?;
//! logkitten::error!(logger, "arm encoder disconnected");
//!
//! // Elsewhere in the program.
//! if let Some(logger) = global::get() {
//!     logger.verbose("teleop", "enabled");
//! }
//!
//! global::clean();
//! # Ok(())
//! # }
//! ```

use std::sync::OnceLock;

use crate::error::SetGlobalError;
use crate::logger::{Builder, Logger};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns a builder preconfigured for the process-wide logger.
///
/// The builder has an empty label and a startup-time file name, both can still be changed.
pub fn builder() -> Builder {
    Logger::builder("").startup_file_name()
}

/// Builds `builder` into the process-wide logger.
///
/// This can only succeed once per process, later calls return [`SetGlobalError`] and do not open
/// any file.
pub fn init(builder: Builder) -> Result<&'static Logger, SetGlobalError> {
    if GLOBAL_LOGGER.get().is_some() {
        return Err(SetGlobalError(()));
    }

    let mut built = false;
    let logger = GLOBAL_LOGGER.get_or_init(|| {
        built = true;
        builder.build()
    });

    if built {
        tracing::debug!(path = %logger.log_path(), "global logger initialized");
        Ok(logger)
    } else {
        Err(SetGlobalError(()))
    }
}

/// Returns the process-wide logger, if [`init`] has been called.
pub fn get() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// Closes the log file of the process-wide logger, if there is one.
pub fn clean() {
    if let Some(logger) = get() {
        logger.clean();
    }
}
