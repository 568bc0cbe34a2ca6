#![forbid(unsafe_code)]

//! `DATE_TIME` and `TIME_SPAN` payloads.
//!
//! Both count 100-nanosecond ticks in an `i64`. A [`DateTime`] counts from
//! 1601-01-01T00:00:00Z; a [`TimeSpan`] is a signed duration.

use std::time::Duration;

use crate::error::{RtError, RtResult};
use crate::property_type::PropertyType;

/// Ticks per second (one tick is 100ns).
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Seconds between 1601-01-01 and 1970-01-01.
pub const UNIX_EPOCH_OFFSET_SECONDS: i64 = 11_644_473_600;

/// An instant, in ticks since 1601-01-01 UTC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTime {
    pub universal_time: i64,
}

impl DateTime {
    #[inline]
    #[must_use]
    pub const fn new(universal_time: i64) -> Self {
        Self { universal_time }
    }

    /// Instant for a count of seconds since the Unix epoch.
    pub fn from_unix_seconds(seconds: i64) -> RtResult<Self> {
        seconds
            .checked_add(UNIX_EPOCH_OFFSET_SECONDS)
            .and_then(|s| s.checked_mul(TICKS_PER_SECOND))
            .map(Self::new)
            .ok_or_else(|| RtError::range(PropertyType::DateTime, seconds))
    }

    /// Whole seconds since the Unix epoch, rounded toward negative infinity.
    #[must_use]
    pub fn to_unix_seconds(&self) -> i64 {
        self.universal_time.div_euclid(TICKS_PER_SECOND) - UNIX_EPOCH_OFFSET_SECONDS
    }

    /// Shift by a span, or `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, span: TimeSpan) -> Option<Self> {
        self.universal_time.checked_add(span.duration).map(Self::new)
    }

    /// Signed span from `earlier` to `self`, or `None` on overflow.
    #[must_use]
    pub fn checked_since(&self, earlier: Self) -> Option<TimeSpan> {
        self.universal_time
            .checked_sub(earlier.universal_time)
            .map(TimeSpan::new)
    }
}

/// A signed duration in ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSpan {
    pub duration: i64,
}

impl TimeSpan {
    #[inline]
    #[must_use]
    pub const fn new(duration: i64) -> Self {
        Self { duration }
    }

    /// Convert from a [`Duration`], truncating below one tick.
    pub fn from_std(value: Duration) -> RtResult<Self> {
        i64::try_from(value.as_nanos() / 100)
            .map(Self::new)
            .map_err(|_| RtError::range(PropertyType::TimeSpan, format_args!("{value:?}")))
    }

    /// Convert to a [`Duration`]; `None` for negative spans.
    #[must_use]
    pub fn to_std(&self) -> Option<Duration> {
        let ticks = u64::try_from(self.duration).ok()?;
        Some(Duration::from_nanos(ticks).saturating_mul(100))
    }

    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.duration < 0
    }
}

impl TryFrom<Duration> for TimeSpan {
    type Error = RtError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Self::from_std(value)
    }
}
