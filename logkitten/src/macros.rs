//! Level macros that capture the call site as the caller tag.
//!
//! - `log!`: Generic macro that accepts a severity
//! - `wtf!`, `fatal!`, `error!`, `warn!`, `verbose!`, `info!`, `debug!`: One per level
//!
//! All of them take a logger followed by `format!`-style arguments. Prefixing the arguments with
//! `unmuted:` makes the call override the mute switch:
//!
//! ```rust,no_run
//! use logkitten::Logger;
//!
//! let logger = Logger::new("Teleop");
//! logkitten::warn!(logger, "intake jammed");
//! logkitten::warn!(logger, unmuted: "intake jammed for {} cycles", 12);
//! ```

/// Logs a message at the given severity.
///
/// # Examples
///
/// ```rust,no_run
/// use logkitten::{Logger, Severity};
///
/// let logger = Logger::new("Auto");
/// logkitten::log!(logger, Severity::ERROR, "path {} not found", "left-start");
/// logkitten::log!(logger, Severity::FATAL, unmuted: "brownout");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, unmuted: $($args:tt)+) => {
        $logger.log(
            $severity,
            $crate::call_site!(),
            ::core::format_args!($($args)+),
            true,
        )
    };
    ($logger:expr, $severity:expr, $($args:tt)+) => {
        $logger.log(
            $severity,
            $crate::call_site!(),
            ::core::format_args!($($args)+),
            false,
        )
    };
}

/// Logs a condition that should never happen.
#[macro_export]
macro_rules! wtf {
    ($logger:expr, $($args:tt)+) => {
        $crate::log!($logger, $crate::Severity::WTF, $($args)+)
    };
}

/// Logs a fatal failure.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($args:tt)+) => {
        $crate::log!($logger, $crate::Severity::FATAL, $($args)+)
    };
}

/// Logs an error.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($args:tt)+) => {
        $crate::log!($logger, $crate::Severity::ERROR, $($args)+)
    };
}

/// Logs a warning.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($args:tt)+) => {
        $crate::log!($logger, $crate::Severity::WARN, $($args)+)
    };
}

/// Logs regular operational output.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($args:tt)+) => {
        $crate::log!($logger, $crate::Severity::VERBOSE, $($args)+)
    };
}

/// Logs at the info level, which is the verbose level.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($args:tt)+) => {
        $crate::log!($logger, $crate::Severity::INFO, $($args)+)
    };
}

/// Logs debugging output.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($args:tt)+) => {
        $crate::log!($logger, $crate::Severity::DEBUG, $($args)+)
    };
}
