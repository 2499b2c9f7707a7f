//! Caller tags captured where a log macro is invoked.

use core::fmt;

/// The source location of a logging call, used as the caller tag of a log line.
///
/// Renders as the last segment of the module path followed by the line number, e.g. `drive:42` for
/// a call on line 42 of `robot::auton::drive`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallSite {
    module_path: &'static str,
    line: u32,
}

impl CallSite {
    /// Creates a call site, prefer the [`call_site!`](crate::call_site) macro.
    pub const fn new(module_path: &'static str, line: u32) -> Self {
        Self { module_path, line }
    }

    /// Returns the full module path of the call.
    pub const fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// Returns the line of the call.
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the last segment of the module path.
    pub fn short_module(&self) -> &'static str {
        self.module_path
            .rsplit("::")
            .next()
            .unwrap_or(self.module_path)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_module(), self.line)
    }
}

/// Captures the [`CallSite`] of the macro invocation.
///
/// ```rust
/// let site = logkitten::call_site!();
/// assert!(site.to_string().contains(':'));
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(::core::module_path!(), ::core::line!())
    };
}
