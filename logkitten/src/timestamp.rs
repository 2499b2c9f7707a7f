//! Wall-clock stamps for log file lines and file names.
//!
//! Stamps render as `YEAR-MONTH-DAY_HOUR:MINUTE:SECOND` in local time with no zero padding on any
//! field, e.g. `2024-3-5_7:4:9`.

use core::fmt;

use time::OffsetDateTime;

/// Source of the current time.
pub type Clock = fn() -> OffsetDateTime;

/// Returns the current local time, falling back to UTC when the local offset cannot be determined.
///
/// On some Unix platforms the offset is unavailable once the process has spawned threads.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// A point in time rendered in the log stamp format.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Stamps the current local time.
    pub fn now() -> Self {
        Self(local_now())
    }

    /// Returns the wrapped date-time.
    pub fn as_datetime(&self) -> OffsetDateTime {
        self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(datetime) = self;
        write!(
            f,
            "{}-{}-{}_{}:{}:{}",
            datetime.year(),
            u8::from(datetime.month()),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            datetime.second(),
        )
    }
}
