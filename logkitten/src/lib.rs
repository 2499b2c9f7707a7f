//! # `logkitten`
//!
//! A leveled logger for robot control programs. Each message is stamped, tagged with its call site
//! and dispatched to up to three sinks, each with its own minimum severity:
//!
//! - an append-only log file, `<log directory>/<label>.log`,
//! - the console (standard output),
//! - an optional operator console, such as a driver station, behind the [`sink::Report`] trait.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use logkitten::{Logger, Severity};
//!
//! let logger = Logger::builder("Auto")
//!     .file_level(Severity::VERBOSE)
//!     .console_level(Severity::WARN)
//!     .build();
//!
//! // Console: `Auto WARN: auton:9: low battery`.
//! // File: `2024-3-5_7:4:9 WARN: auton:9: low battery`.
//! logkitten::warn!(logger, "low battery");
//! // File only.
//! logkitten::debug!(logger, "tick");
//!
//! logger.clean();
//! ```
//!
//! ## Configuration
//!
//! Defaults for new loggers, the log directory and the mute switch live in [`Settings`]. The
//! process-wide instance is [`Settings::global`], it can be filled from a TOML [`Config`].
//!
//! ## Failure Handling
//!
//! Logging never fails from the caller's point of view. A log file that cannot be opened, a failed
//! write or a failed close is reported on the console and logging carries on with the remaining
//! sinks.

#![forbid(unsafe_code)]

pub mod call_site;
pub mod config;
pub mod error;
pub mod global;
pub mod logger;
mod macros;
pub mod severity;
pub mod sink;
pub mod timestamp;

pub use call_site::CallSite;
pub use config::{Config, Settings};
pub use logger::{Builder, Logger, Thresholds};
pub use severity::Severity;
