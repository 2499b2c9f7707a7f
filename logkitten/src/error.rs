//! Error types.
//!
//! None of these escape a logging call, they are reported on the console and swallowed there.
//! They are returned from the lower level sink and configuration APIs.

use camino::Utf8PathBuf;

/// Failures of the log file sink.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    /// The file was never opened or has been closed.
    #[error("sink not open")]
    NotOpen,

    /// The file could not be opened or created.
    #[error("could not open {path}")]
    Open {
        /// Path of the log file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing a line failed.
    #[error("write failed")]
    Write(#[source] std::io::Error),

    /// Flushing after a write failed.
    #[error("flush failed")]
    Flush(#[source] std::io::Error),

    /// Flushing on close failed, the file is released regardless.
    #[error("close failed")]
    Close(#[source] std::io::Error),
}

/// Failures loading a [`Config`](crate::Config).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read configuration {path}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has unexpected fields.
    #[error("invalid configuration")]
    Parse(#[from] toml::de::Error),

    /// The configuration holds a value TOML cannot represent, such as a custom severity.
    #[error("could not serialize configuration")]
    Serialize(#[from] toml::ser::Error),
}

/// Returned by [`global::init`](crate::global::init) when the global logger is already set.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("a global logger has already been set")]
pub struct SetGlobalError(pub(crate) ());

/// Renders `error` followed by its chain of sources, separated by `: `.
pub(crate) fn render_chain(error: &dyn core::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
