//! Process-wide logging configuration.
//!
//! [`Config`] is the plain record of defaults, it can be built in code or loaded from TOML:
//!
//! ```toml
//! log_directory = "/home/lvuser/logs"
//! default_file_level = "VERBOSE"
//! default_console_level = "WARN"
//! default_operator_level = "ERROR"
//! mute = false
//! ```
//!
//! [`Settings`] wraps a [`Config`] as the live, shared state every [`Logger`](crate::Logger) built
//! from it consults: the mute switch applies to all of them immediately, the defaults apply to
//! loggers built afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::Severity;
use crate::error::ConfigError;

/// Directory log files are written to unless configured otherwise.
pub const DEFAULT_LOG_DIRECTORY: &str = "/home/lvuser/logs";

/// Logging defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the log files.
    pub log_directory: Utf8PathBuf,

    /// Minimum severity written to log files.
    pub default_file_level: Severity,

    /// Minimum severity printed to the console.
    pub default_console_level: Severity,

    /// Minimum severity forwarded to the operator console.
    ///
    /// `None` follows the console level of each logger.
    pub default_operator_level: Option<Severity>,

    /// Suppresses console and operator console output of calls that do not override it.
    pub mute: bool,
}

impl Default for Config {
    /// Creates default instance of the [`Config`].
    ///
    /// # Defaults
    ///
    /// - [`Config::log_directory`] - [`DEFAULT_LOG_DIRECTORY`].
    /// - [`Config::default_file_level`] - [`Severity::VERBOSE`].
    /// - [`Config::default_console_level`] - [`Severity::WARN`].
    /// - [`Config::default_operator_level`] - `None`.
    /// - [`Config::mute`] - `false`.
    fn default() -> Self {
        Self {
            log_directory: Utf8PathBuf::from(DEFAULT_LOG_DIRECTORY),
            default_file_level: Severity::VERBOSE,
            default_console_level: Severity::WARN,
            default_operator_level: None,
            mute: false,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML, missing fields take their defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Renders the configuration as TOML.
    ///
    /// Only built-in severities can be written, custom ones fail with
    /// [`ConfigError::Serialize`].
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&toml)
    }
}

/// Live configuration shared by a family of loggers.
#[derive(Debug)]
pub struct Settings {
    mute: AtomicBool,
    defaults: RwLock<Config>,
}

static GLOBAL_SETTINGS: LazyLock<Arc<Settings>> =
    LazyLock::new(|| Arc::new(Settings::from_config(Config::default())));

impl Settings {
    /// Creates settings independent of the process-wide ones.
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self::from_config(config))
    }

    fn from_config(config: Config) -> Self {
        Self {
            mute: AtomicBool::new(config.mute),
            defaults: RwLock::new(config),
        }
    }

    /// Returns the process-wide settings, initialised with [`Config::default`] on first use.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_SETTINGS)
    }

    /// Returns a snapshot of the current configuration.
    pub fn snapshot(&self) -> Config {
        let mut config = self.read().clone();
        config.mute = self.is_muted();
        config
    }

    /// Replaces every setting with `config`.
    pub fn apply(&self, config: Config) {
        self.mute.store(config.mute, Ordering::Relaxed);
        *self.write() = config;
    }

    /// Returns the directory new log files are created in.
    pub fn log_directory(&self) -> Utf8PathBuf {
        self.read().log_directory.clone()
    }

    /// Sets the directory new log files are created in.
    pub fn set_log_directory(&self, log_directory: impl Into<Utf8PathBuf>) {
        self.write().log_directory = log_directory.into();
    }

    /// Returns the file threshold given to new loggers.
    pub fn default_file_level(&self) -> Severity {
        self.read().default_file_level
    }

    /// Sets the file threshold given to new loggers.
    pub fn set_default_file_level(&self, level: Severity) {
        self.write().default_file_level = level;
    }

    /// Returns the console threshold given to new loggers.
    pub fn default_console_level(&self) -> Severity {
        self.read().default_console_level
    }

    /// Sets the console threshold given to new loggers.
    pub fn set_default_console_level(&self, level: Severity) {
        self.write().default_console_level = level;
    }

    /// Returns the operator console threshold given to new loggers, `None` follows the console.
    pub fn default_operator_level(&self) -> Option<Severity> {
        self.read().default_operator_level
    }

    /// Sets the operator console threshold given to new loggers.
    pub fn set_default_operator_level(&self, level: Option<Severity>) {
        self.write().default_operator_level = level;
    }

    /// Returns whether console and operator console output is muted.
    pub fn is_muted(&self) -> bool {
        self.mute.load(Ordering::Relaxed)
    }

    /// Mutes or unmutes console and operator console output, file output is never muted.
    pub fn set_mute(&self, mute: bool) {
        self.mute.store(mute, Ordering::Relaxed);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Config> {
        self.defaults.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Config> {
        self.defaults.write().unwrap_or_else(PoisonError::into_inner)
    }
}
