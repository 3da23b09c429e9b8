use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};
use mockall::automock;
use serde::{Deserialize, Serialize};

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_HOUR: i64 = 60 * 60 * NANOS_PER_SECOND;
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Wall-clock instant as integer nanoseconds since the Unix epoch.
///
/// The workspace store exchanges every date in this form, so all duration math stays in `i64`
/// and never goes through floating point.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Instants outside the `i64` nanosecond range clamp to the nearest bound.
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        match value.timestamp_nanos_opt() {
            Some(nanos) => Self(nanos),
            None if value.timestamp() < 0 => Self(i64::MIN),
            None => Self(i64::MAX),
        }
    }

    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }

    pub fn saturating_add_nanos(self, nanos: i64) -> Self {
        Self(self.0.saturating_add(nanos))
    }

    pub fn saturating_add_days(self, days: i64) -> Self {
        self.saturating_add_nanos(days.saturating_mul(NANOS_PER_DAY))
    }

    /// Signed distance from `self` to `later`; negative when `later` is in the past.
    pub fn nanos_until(self, later: Timestamp) -> i64 {
        later.0.saturating_sub(self.0)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_datetime().to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Whole days covering `nanos`, rounded up. Non-positive input yields 0.
pub fn ceil_days(nanos: i64) -> u64 {
    if nanos <= 0 {
        return 0;
    }
    let whole = nanos / NANOS_PER_DAY;
    let partial = if nanos % NANOS_PER_DAY != 0 { 1 } else { 0 };
    (whole + partial) as u64
}

#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(Utc::now())
    }
}
