//! Exact points on a timeline.

use std::fmt;
use std::ops::{Add, Sub};

use crate::duration::{divide_remainder, Duration, MILLIS_IN_DAY};
use crate::system::sys_time;


/// An **instant** is an exact point on the timeline, irrespective of time
/// zone or calendar format, with millisecond precision.
///
/// Internally, this is a 64-bit count of milliseconds since the Unix epoch,
/// or nothing at all: an instant parsed or computed from indeterminate input
/// is *invalid*, and carries no time value. Validity must be checked with
/// [`is_valid`](Instant::is_valid) before arithmetic or comparison results
/// mean anything — an invalid instant sorts before every valid one, which is
/// an artefact of the representation rather than a statement about time.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Instant {
    millis: Option<i64>,
}

impl Instant {

    /// Creates a new Instant set to the number of milliseconds since the
    /// Unix epoch.
    pub fn at(millis: i64) -> Self {
        Self { millis: Some(millis) }
    }

    /// Creates a new Instant set to the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::at(0)
    }

    /// Creates the invalid instant.
    pub fn invalid() -> Self {
        Self { millis: None }
    }

    /// Creates a new Instant set to the computer’s current time.
    pub fn now() -> Self {
        let (seconds, milliseconds) = unsafe { sys_time() };
        Self::at(seconds * 1_000 + i64::from(milliseconds))
    }

    /// Returns the number of milliseconds since the Unix epoch at this
    /// instant, or `None` for the invalid instant.
    pub fn millis(self) -> Option<i64> {
        self.millis
    }

    /// Returns whether this instant holds a determinate time value.
    pub fn is_valid(self) -> bool {
        self.millis.is_some()
    }

    /// Moves this instant by a raw number of milliseconds. Shifting the
    /// invalid instant yields the invalid instant.
    pub fn shift(self, delta_millis: i64) -> Self {
        Self { millis: self.millis.map(|ms| ms + delta_millis) }
    }

    /// Returns the length of time from `earlier` up to this instant, or
    /// `None` if either instant is invalid.
    pub fn since(self, earlier: Self) -> Option<Duration> {
        match (self.millis, earlier.millis) {
            (Some(a), Some(b)) => Some(Duration::of(a - b)),
            _ => None,
        }
    }

    /// Returns the first millisecond of the UTC calendar day containing
    /// this instant.
    pub fn start_of_day(self) -> Self {
        Self {
            millis: self.millis.map(|ms| {
                let (day, _) = divide_remainder(ms, MILLIS_IN_DAY);
                day * MILLIS_IN_DAY
            }),
        }
    }

    /// Returns the last millisecond of the UTC calendar day containing
    /// this instant.
    pub fn end_of_day(self) -> Self {
        self.start_of_day().shift(MILLIS_IN_DAY - 1)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.millis {
            Some(ms) => write!(f, "Instant({}ms)", ms),
            None => write!(f, "Instant(invalid)"),
        }
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    fn add(self, duration: Duration) -> Self {
        self.shift(duration.millis())
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        self.shift(-duration.millis())
    }
}
