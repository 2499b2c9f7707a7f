//! Ordered log severities.
//!
//! A [`Severity`] both tags a message and acts as the minimum a sink accepts. Ordering follows the
//! rank: a lower rank is more severe, so `Severity::WTF < Severity::DEBUG`.
//!
//! ```rust
//! use logkitten::Severity;
//!
//! assert!(Severity::ERROR < Severity::WARN);
//! assert!(Severity::ERROR.accepted_by(Severity::WARN));
//! assert!(!Severity::DEBUG.accepted_by(Severity::WARN));
//! assert_eq!(Severity::INFO, Severity::VERBOSE);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named log level with a numeric rank.
///
/// Equality, ordering and hashing only look at the rank, two severities with the same rank are the
/// same level whatever their names are.
#[derive(Copy, Clone, Debug)]
pub struct Severity {
    name: &'static str,
    rank: i32,
}

impl Severity {
    /// What a Terrible Failure: a condition that should never happen.
    pub const WTF: Self = Self::new("WTF", -1);

    /// A failure the program cannot recover from.
    pub const FATAL: Self = Self::new("FATAL", 0);

    /// A failure of the current operation.
    pub const ERROR: Self = Self::new("ERROR", 1);

    /// A hazardous situation.
    pub const WARN: Self = Self::new("WARN", 2);

    /// Regular operational output.
    pub const VERBOSE: Self = Self::new("VERBOSE", 3);

    /// Alias of [`Severity::VERBOSE`].
    pub const INFO: Self = Self::VERBOSE;

    /// Detailed output for development.
    pub const DEBUG: Self = Self::new("DEBUG", 4);

    /// All built-in severities, most severe first.
    pub const BUILT_IN: [Self; 6] = [
        Self::WTF,
        Self::FATAL,
        Self::ERROR,
        Self::WARN,
        Self::VERBOSE,
        Self::DEBUG,
    ];

    /// Creates a severity from its display name and rank.
    pub const fn new(name: &'static str, rank: i32) -> Self {
        Self { name, rank }
    }

    /// Returns the display name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the rank, lower is more severe.
    pub const fn rank(&self) -> i32 {
        self.rank
    }

    /// Returns whether a sink configured with `threshold` accepts messages of this severity.
    ///
    /// That is the case when `self` is at least as severe as `threshold`.
    pub const fn accepted_by(&self, threshold: Severity) -> bool {
        self.rank <= threshold.rank
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Severity {}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl Hash for Severity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Returned when parsing a name that is not one of the built-in severities.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity {0:?}, expected one of WTF, FATAL, ERROR, WARN, VERBOSE, INFO, DEBUG")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses a built-in severity name, ignoring ASCII case. `INFO` yields [`Severity::VERBOSE`].
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if string.eq_ignore_ascii_case("INFO") {
            return Ok(Self::INFO);
        }

        Self::BUILT_IN
            .into_iter()
            .find(|severity| severity.name.eq_ignore_ascii_case(string))
            .ok_or_else(|| ParseSeverityError(string.to_owned()))
    }
}

impl Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !Self::BUILT_IN
            .iter()
            .any(|built_in| built_in.name == self.name && built_in.rank == self.rank)
        {
            return Err(serde::ser::Error::custom(format_args!(
                "custom severity {} (rank {}) cannot be serialized",
                self.name, self.rank
            )));
        }
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
