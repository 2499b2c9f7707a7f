//! The logger and its dispatch to the file, console and operator console sinks.
//!
//! Every call is checked against three independent thresholds:
//!
//! - the file sink receives `<timestamp> <LEVEL>: <tag>: <message> \n`,
//! - the console receives `<label> <LEVEL>: <tag>: <message> \n`,
//! - the operator console, if attached, receives `<LEVEL>: <tag>: <message> \n`.
//!
//! The shared mute switch of [`Settings`] silences the console and the operator console, never the
//! file. A call made with `override_mute` set ignores the mute switch, the thresholds still apply.

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use camino::Utf8PathBuf;

use crate::Severity;
use crate::config::Settings;
use crate::error::render_chain;
use crate::sink::{FileSink, Report, StdoutReporter};
use crate::timestamp::{Clock, Timestamp, local_now};

/// The minimum severities each sink of a [`Logger`] accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Thresholds {
    /// Minimum severity written to the log file.
    pub file: Severity,
    /// Minimum severity printed to the console.
    pub console: Severity,
    /// Minimum severity forwarded to the operator console.
    pub operator: Severity,
}

/// A labelled logger owning one log file.
///
/// Loggers are `Sync`, one instance can be shared between threads. Lines written to the file are
/// serialized and flushed one by one.
///
/// # Examples
///
/// ```rust,no_run
/// use logkitten::{Logger, Severity};
///
/// let logger = Logger::builder("Auto")
///     .file_level(Severity::VERBOSE)
///     .console_level(Severity::WARN)
///     .build();
///
/// logkitten::warn!(logger, "low battery: {:.1}V", 11.4);
/// logkitten::debug!(logger, "tick");
/// logger.clean();
/// ```
#[derive(Debug)]
pub struct Logger {
    label: String,
    settings: Arc<Settings>,
    thresholds: RwLock<Thresholds>,
    file: Mutex<FileSink>,
    console: Arc<dyn Report>,
    operator: Option<Arc<dyn Report>>,
    clock: Clock,
}

/// Builder for a [`Logger`].
///
/// Created via [`Logger::builder`] and finalized with [`build`](Builder::build). Thresholds that
/// are not set explicitly are taken from the [`Settings`] at build time.
#[derive(Debug)]
#[must_use]
pub struct Builder {
    label: String,
    settings: Option<Arc<Settings>>,
    file_level: Option<Severity>,
    console_level: Option<Severity>,
    operator_level: Option<Severity>,
    console: Option<Arc<dyn Report>>,
    operator: Option<Arc<dyn Report>>,
    clock: Clock,
    file_name: FileName,
}

#[derive(Debug)]
enum FileName {
    Label,
    Startup,
    Custom(String),
}

impl Builder {
    fn new(label: String) -> Self {
        Self {
            label,
            settings: None,
            file_level: None,
            console_level: None,
            operator_level: None,
            console: None,
            operator: None,
            clock: local_now,
            file_name: FileName::Label,
        }
    }

    /// Uses `settings` for the defaults and the mute switch instead of [`Settings::global`].
    pub fn settings(mut self, settings: Arc<Settings>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Sets the minimum severity written to the log file.
    pub fn file_level(mut self, level: Severity) -> Self {
        self.file_level = Some(level);
        self
    }

    /// Sets the minimum severity printed to the console.
    pub fn console_level(mut self, level: Severity) -> Self {
        self.console_level = Some(level);
        self
    }

    /// Sets the minimum severity forwarded to the operator console.
    ///
    /// Defaults to the configured operator level, or the console level if there is none.
    pub fn operator_level(mut self, level: Severity) -> Self {
        self.operator_level = Some(level);
        self
    }

    /// Replaces the console sink, standard output by default.
    pub fn console(mut self, console: impl Report + 'static) -> Self {
        self.console = Some(Arc::new(console));
        self
    }

    /// Attaches an operator console sink.
    pub fn operator(mut self, operator: impl Report + 'static) -> Self {
        self.operator = Some(Arc::new(operator));
        self
    }

    /// Replaces the clock used for timestamps.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Names the log file `<file_name>` inside the log directory instead of `<label>.log`.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = FileName::Custom(file_name.into());
        self
    }

    /// Names the log file after the time the logger is built, `<timestamp>.log`.
    pub fn startup_file_name(mut self) -> Self {
        self.file_name = FileName::Startup;
        self
    }

    /// Builds the logger and opens its log file.
    ///
    /// This never fails: if the file cannot be opened a diagnostic is printed to the console sink
    /// and the logger runs without file output.
    pub fn build(self) -> Logger {
        let settings = self.settings.unwrap_or_else(Settings::global);
        let config = settings.snapshot();

        let console_level = self.console_level.unwrap_or(config.default_console_level);
        let thresholds = Thresholds {
            file: self.file_level.unwrap_or(config.default_file_level),
            console: console_level,
            operator: self
                .operator_level
                .or(config.default_operator_level)
                .unwrap_or(console_level),
        };

        let file_name = match self.file_name {
            FileName::Label => format!("{}.log", self.label),
            FileName::Startup => format!("{}.log", Timestamp::from((self.clock)())),
            FileName::Custom(file_name) => file_name,
        };
        let path = config.log_directory.join(file_name);

        let console = self
            .console
            .unwrap_or_else(|| Arc::new(StdoutReporter::DEFAULT));

        let file = FileSink::open(&path).unwrap_or_else(|error| {
            let error = render_chain(&error);
            tracing::warn!(
                label = %self.label,
                %error,
                "log file unavailable, file output disabled"
            );
            console.report(&format!("Could not open logfile: {error}\n"));
            FileSink::closed(path)
        });

        Logger {
            label: self.label,
            settings,
            thresholds: RwLock::new(thresholds),
            file: Mutex::new(file),
            console,
            operator: self.operator,
            clock: self.clock,
        }
    }
}

/// Generates the plain and the mute overriding method of each level.
macro_rules! level_methods {
    ($($(#[doc = $doc:literal])* $severity:ident => $plain:ident, $with_override:ident;)*) => {
        $(
            $(#[doc = $doc])*
            pub fn $plain(&self, tag: impl fmt::Display, message: impl fmt::Display) {
                self.log(Severity::$severity, tag, message, false);
            }

            $(#[doc = $doc])*
            ///
            /// With `override_mute` set the line reaches the console even while muted.
            pub fn $with_override(
                &self,
                tag: impl fmt::Display,
                message: impl fmt::Display,
                override_mute: bool,
            ) {
                self.log(Severity::$severity, tag, message, override_mute);
            }
        )*
    };
}

impl Logger {
    /// Creates a builder for a logger labelled `label`.
    ///
    /// The label prefixes console lines and names the log file `<label>.log`.
    pub fn builder(label: impl Into<String>) -> Builder {
        Builder::new(label.into())
    }

    /// Creates a logger with the defaults of [`Settings::global`].
    pub fn new(label: impl Into<String>) -> Self {
        Self::builder(label).build()
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the settings this logger follows.
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Returns the path of the log file.
    pub fn log_path(&self) -> Utf8PathBuf {
        self.file().path().to_owned()
    }

    /// Returns whether the log file is open.
    pub fn is_file_open(&self) -> bool {
        self.file().is_open()
    }

    /// Returns the current thresholds.
    pub fn thresholds(&self) -> Thresholds {
        *self.thresholds.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the minimum severity written to the log file.
    pub fn set_file_threshold(&self, level: Severity) {
        self.update_thresholds(|thresholds| thresholds.file = level);
    }

    /// Sets the minimum severity printed to the console.
    pub fn set_console_threshold(&self, level: Severity) {
        self.update_thresholds(|thresholds| thresholds.console = level);
    }

    /// Sets the minimum severity forwarded to the operator console.
    pub fn set_operator_threshold(&self, level: Severity) {
        self.update_thresholds(|thresholds| thresholds.operator = level);
    }

    fn update_thresholds(&self, update: impl FnOnce(&mut Thresholds)) {
        let mut thresholds = self.thresholds.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut *thresholds);
    }

    fn file(&self) -> MutexGuard<'_, FileSink> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Logs `message` at `severity` to every sink whose threshold accepts it.
    ///
    /// Prefer the level methods or the macros, which capture the call site as `tag`.
    ///
    /// Sink failures are reported on the console and never surface to the caller.
    pub fn log(
        &self,
        severity: Severity,
        tag: impl fmt::Display,
        message: impl fmt::Display,
        override_mute: bool,
    ) {
        let thresholds = self.thresholds();

        if severity.accepted_by(thresholds.file) {
            let mut file = self.file();
            let timestamp = Timestamp::from((self.clock)());
            let line = format!("{timestamp} {severity}: {tag}: {message} \n");
            if let Err(error) = file.write_line(&line) {
                drop(file);
                let error = render_chain(&error);
                tracing::warn!(label = %self.label, %severity, %error, "failed to write log line");
                self.console.report(&format!("Error logging {severity} message: {error}\n"));
            }
        }

        if self.settings.is_muted() && !override_mute {
            return;
        }

        if severity.accepted_by(thresholds.console) {
            let line = if self.label.is_empty() {
                format!("{severity}: {tag}: {message} \n")
            } else {
                format!("{} {severity}: {tag}: {message} \n", self.label)
            };
            self.console.report(&line);
        }

        if let Some(operator) = &self.operator
            && severity.accepted_by(thresholds.operator)
        {
            operator.report(&format!("{severity}: {tag}: {message} \n"));
        }
    }

    level_methods! {
        /// Logs a condition that should never happen at [`Severity::WTF`].
        WTF => wtf, wtf_with_override;
        /// Logs at [`Severity::FATAL`].
        FATAL => fatal, fatal_with_override;
        /// Logs at [`Severity::ERROR`].
        ERROR => error, error_with_override;
        /// Logs at [`Severity::WARN`].
        WARN => warn, warn_with_override;
        /// Logs at [`Severity::VERBOSE`].
        VERBOSE => verbose, verbose_with_override;
        /// Logs at [`Severity::INFO`], the same level as [`Severity::VERBOSE`].
        INFO => info, info_with_override;
        /// Logs at [`Severity::DEBUG`].
        DEBUG => debug, debug_with_override;
    }

    /// Flushes and closes the log file.
    ///
    /// Later calls still reach the console, file writes report `sink not open` instead. Closing an
    /// already closed logger does nothing.
    pub fn clean(&self) {
        let result = self.file().close();
        if let Err(error) = result {
            let error = render_chain(&error);
            tracing::warn!(label = %self.label, %error, "failed to close log file");
            self.console.report(&format!("Could not close logfile: {error}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;
    use time::{Date, Month, OffsetDateTime};
    use tracing_test::traced_test;

    use super::{Logger, Thresholds};
    use crate::Severity;
    use crate::config::{Config, Settings};
    use crate::sink::MemoryReporter;

    fn fixed_clock() -> OffsetDateTime {
        Date::from_calendar_date(2024, Month::March, 5)
            .unwrap()
            .with_hms(7, 4, 9)
            .unwrap()
            .assume_utc()
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        settings: Arc<Settings>,
        console: MemoryReporter,
        operator: MemoryReporter,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let settings = Settings::new(Config {
                log_directory: Utf8PathBuf::from_path_buf(dir.path().to_owned()).unwrap(),
                ..Config::default()
            });
            Self {
                _dir: dir,
                settings,
                console: MemoryReporter::new(),
                operator: MemoryReporter::new(),
            }
        }

        fn logger(&self, label: &str) -> Logger {
            Logger::builder(label)
                .settings(self.settings.clone())
                .console(self.console.clone())
                .operator(self.operator.clone())
                .clock(fixed_clock)
                .build()
        }

        fn file_contents(&self, logger: &Logger) -> String {
            std::fs::read_to_string(logger.log_path()).unwrap()
        }
    }

    #[test]
    fn thresholds_follow_settings_defaults() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");

        assert_eq!(
            logger.thresholds(),
            Thresholds {
                file: Severity::VERBOSE,
                console: Severity::WARN,
                operator: Severity::WARN,
            }
        );
    }

    #[test]
    fn operator_default_comes_from_settings() {
        let fixture = Fixture::new();
        fixture
            .settings
            .set_default_operator_level(Some(Severity::ERROR));

        let logger = fixture.logger("Auto");
        assert_eq!(logger.thresholds().operator, Severity::ERROR);
    }

    #[test]
    fn file_name_is_label() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");

        assert_eq!(logger.log_path().file_name(), Some("Auto.log"));
        assert!(logger.is_file_open());
    }

    #[test]
    fn startup_file_name_uses_clock() {
        let fixture = Fixture::new();
        let logger = Logger::builder("")
            .settings(fixture.settings.clone())
            .console(fixture.console.clone())
            .clock(fixed_clock)
            .startup_file_name()
            .build();

        assert_eq!(logger.log_path().file_name(), Some("2024-3-5_7:4:9.log"));
    }

    #[test]
    fn warn_reaches_every_sink() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");

        logger.warn("drive", "low battery");

        assert_eq!(
            fixture.file_contents(&logger),
            "2024-3-5_7:4:9 WARN: drive: low battery \n"
        );
        assert_eq!(fixture.console.take(), ["Auto WARN: drive: low battery \n"]);
        assert_eq!(fixture.operator.take(), ["WARN: drive: low battery \n"]);
    }

    #[test]
    fn debug_only_reaches_a_debug_file_threshold() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");

        logger.debug("loop", "tick");
        assert_eq!(fixture.file_contents(&logger), "");

        logger.set_file_threshold(Severity::DEBUG);
        logger.debug("loop", "tick");

        assert_eq!(
            fixture.file_contents(&logger),
            "2024-3-5_7:4:9 DEBUG: loop: tick \n"
        );
        assert!(fixture.console.take().is_empty());
        assert!(fixture.operator.take().is_empty());
    }

    #[test]
    fn mute_only_silences_the_console_sinks() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");
        fixture.settings.set_mute(true);

        logger.error("arm", "stalled");

        assert_eq!(
            fixture.file_contents(&logger),
            "2024-3-5_7:4:9 ERROR: arm: stalled \n"
        );
        assert!(fixture.console.take().is_empty());
        assert!(fixture.operator.take().is_empty());
    }

    #[test]
    fn override_bypasses_mute_but_not_thresholds() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");
        fixture.settings.set_mute(true);

        logger.warn_with_override("arm", "loud", true);
        logger.verbose_with_override("arm", "still filtered", true);

        assert_eq!(fixture.console.take(), ["Auto WARN: arm: loud \n"]);
        assert_eq!(fixture.operator.take(), ["WARN: arm: loud \n"]);
    }

    #[test]
    fn operator_threshold_is_independent() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");
        logger.set_operator_threshold(Severity::FATAL);
        logger.set_console_threshold(Severity::DEBUG);

        logger.error("vision", "no target");
        logger.fatal("vision", "camera lost");

        assert_eq!(
            fixture.console.take(),
            [
                "Auto ERROR: vision: no target \n",
                "Auto FATAL: vision: camera lost \n"
            ]
        );
        assert_eq!(fixture.operator.take(), ["FATAL: vision: camera lost \n"]);
    }

    #[test]
    fn info_and_verbose_filter_alike() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");
        logger.set_file_threshold(Severity::WARN);

        logger.info("init", "dropped");
        logger.verbose("init", "dropped");
        logger.set_file_threshold(Severity::VERBOSE);
        logger.info("init", "kept");
        logger.verbose("init", "kept");

        assert_eq!(
            fixture.file_contents(&logger),
            "2024-3-5_7:4:9 VERBOSE: init: kept \n2024-3-5_7:4:9 VERBOSE: init: kept \n"
        );
    }

    #[test]
    fn empty_label_omits_console_prefix() {
        let fixture = Fixture::new();
        let logger = fixture.logger("");

        logger.wtf("auton", "impossible");

        assert_eq!(fixture.console.take(), ["WTF: auton: impossible \n"]);
    }

    #[test]
    #[traced_test]
    fn write_after_clean_reports_sink_not_open() {
        let fixture = Fixture::new();
        let logger = fixture.logger("Auto");

        logger.clean();
        logger.clean();
        assert!(!logger.is_file_open());

        logger.error("arm", "after close");

        assert_eq!(
            fixture.console.take(),
            [
                "Error logging ERROR message: sink not open\n",
                "Auto ERROR: arm: after close \n"
            ]
        );
        assert!(logs_contain("failed to write log line"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    #[traced_test]
    fn write_failure_is_reported_with_its_cause() {
        let fixture = Fixture::new();
        fixture.settings.set_log_directory("/dev");

        let logger = Logger::builder("Auto")
            .settings(fixture.settings.clone())
            .console(fixture.console.clone())
            .clock(fixed_clock)
            .file_name("full")
            .build();
        assert!(logger.is_file_open());

        logger.error("arm", "stalled");

        assert_eq!(
            fixture.console.take(),
            [
                "Error logging ERROR message: write failed: No space left on device (os error 28)\n",
                "Auto ERROR: arm: stalled \n"
            ]
        );
        assert!(logs_contain("failed to write log line"));
    }

    #[test]
    #[traced_test]
    fn unopenable_file_degrades_to_console() {
        let fixture = Fixture::new();
        fixture.settings.set_log_directory("/nonexistent/logkitten");

        let logger = fixture.logger("Auto");
        assert!(!logger.is_file_open());

        let diagnostics = fixture.console.take();
        assert_eq!(diagnostics.len(), 1);
        assert!(
            diagnostics[0]
                .starts_with("Could not open logfile: could not open /nonexistent/logkitten/Auto.log")
        );
        assert!(logs_contain("log file unavailable"));

        logger.warn("drive", "still printed");
        assert_eq!(
            fixture.console.take(),
            [
                "Error logging WARN message: sink not open\n",
                "Auto WARN: drive: still printed \n"
            ]
        );
    }
}
