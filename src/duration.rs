//! Lengths of time on the timeline, and their textual renderings.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::Euclid;


/// Number of milliseconds in a day. As everywhere in this library, leap
/// seconds are simply ignored.
pub const MILLIS_IN_DAY: i64 = 86_400_000;

const MILLIS_IN_HOUR: i64 = 3_600_000;
const MILLIS_IN_MINUTE: i64 = 60_000;
const MILLIS_IN_SECOND: i64 = 1_000;


/// Splits `value` by `denominator`, returning the floored quotient and the
/// remainder left over.
///
/// For any positive denominator the two results satisfy
/// `quotient * denominator + remainder == value`, with the remainder never
/// negative — Euclidean division, rather than the truncating `/` and `%`
/// operators, which disagree with each other below zero. Callers that want a
/// sign-robust decomposition of a delta should still feed in the absolute
/// value and track the sign themselves, the way [`Duration::decompose`] does.
pub fn divide_remainder(value: i64, denominator: i64) -> (i64, i64) {
    (Euclid::div_euclid(&value, &denominator), Euclid::rem_euclid(&value, &denominator))
}


/// A **duration** is a length of time on the timeline, irrespective of time
/// zone or calendar format, with millisecond precision. It may be negative.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Duration {
    millis: i64,
}

/// A duration broken into calendar-free components, always non-negative,
/// with the overall sign carried separately.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Components {
    pub negative: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl Duration {

    /// Create a new zero-length duration.
    pub fn zero() -> Self {
        Self { millis: 0 }
    }

    /// Create a new duration that’s the given number of milliseconds long.
    pub fn of(millis: i64) -> Self {
        Self { millis }
    }

    /// Create a new duration that’s the given number of seconds long.
    pub fn of_seconds(seconds: i64) -> Self {
        Self { millis: seconds * MILLIS_IN_SECOND }
    }

    /// Returns the total length of this duration in milliseconds.
    pub fn millis(self) -> i64 {
        self.millis
    }

    /// Returns whether this duration points backwards in time.
    pub fn is_negative(self) -> bool {
        self.millis < 0
    }

    /// Breaks this duration into day, hour, minute, second, and millisecond
    /// parts. The decomposition operates on the absolute value, so every
    /// part comes out non-negative; the sign survives only in the
    /// `negative` flag, which the renderers below turn into a leading `-`.
    pub fn decompose(self) -> Components {
        let (rest, milliseconds) = divide_remainder(self.millis.saturating_abs(), MILLIS_IN_SECOND);
        let (rest, seconds) = divide_remainder(rest, 60);
        let (rest, minutes) = divide_remainder(rest, 60);
        let (days, hours) = divide_remainder(rest, 24);

        Components {
            negative: self.millis < 0,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Renders this duration in the compact `D:HH:MM:SS.mmm` form, with a
    /// leading `-` for negative durations. The day count is unpadded; the
    /// other fields are zero-padded to their natural widths.
    ///
    /// ```
    /// use datespan::Duration;
    ///
    /// assert_eq!(Duration::of(3_600_000).iso(), "0:01:00:00.000");
    /// assert_eq!(Duration::of(-5_490_000).iso(), "-0:01:31:30.000");
    /// ```
    pub fn iso(self) -> String {
        let c = self.decompose();
        format!("{}{}:{:02}:{:02}:{:02}.{:03}",
                if c.negative { "-" } else { "" },
                c.days, c.hours, c.minutes, c.seconds, c.milliseconds)
    }

    /// Renders this duration in the spelled-out long form, with no
    /// zero-padding anywhere. The fractional seconds part is the literal
    /// millisecond remainder, not normalised to three digits: 1 second and
    /// 50 milliseconds renders as `1.50 seconds`.
    ///
    /// ```
    /// use datespan::Duration;
    ///
    /// assert_eq!(Duration::of(3_600_000).long_form(),
    ///            "0 days, 1 hours, 0 minutes, 0.0 seconds");
    /// ```
    pub fn long_form(self) -> String {
        let c = self.decompose();
        format!("{}{} days, {} hours, {} minutes, {}.{} seconds",
                if c.negative { "-" } else { "" },
                c.days, c.hours, c.minutes, c.seconds, c.milliseconds)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}ms)", self.millis)
    }
}

impl Add<Duration> for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::of(self.millis + rhs.millis)
    }
}

impl Sub<Duration> for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::of(self.millis - rhs.millis)
    }
}

impl Mul<i64> for Duration {
    type Output = Self;

    fn mul(self, amount: i64) -> Self {
        Self::of(self.millis * amount)
    }
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self {
        Self::of(-self.millis)
    }
}


#[cfg(test)]
mod test {
    use super::{divide_remainder, Duration, MILLIS_IN_HOUR, MILLIS_IN_MINUTE};

    mod division {
        use super::*;

        #[test]
        fn exact() {
            assert_eq!(divide_remainder(86_400_000, 1_000), (86_400, 0));
        }

        #[test]
        fn leftovers() {
            assert_eq!(divide_remainder(90_061, 60), (1_501, 1));
        }

        #[test]
        fn below_zero() {
            let (quotient, remainder) = divide_remainder(-7, 2);
            assert_eq!((quotient, remainder), (-4, 1));
            assert_eq!(quotient * 2 + remainder, -7);
        }

        #[test]
        fn reassembles() {
            for value in [0_i64, 1, 999, 1_000, 86_399_999, 123_456_789] {
                for denominator in [1_i64, 7, 1_000, 86_400_000] {
                    let (quotient, remainder) = divide_remainder(value, denominator);
                    assert_eq!(quotient * denominator + remainder, value);
                    assert!(remainder >= 0 && remainder < denominator);
                }
            }
        }
    }

    mod decomposition {
        use super::*;

        #[test]
        fn one_hour() {
            let c = Duration::of(MILLIS_IN_HOUR).decompose();
            assert_eq!((c.days, c.hours, c.minutes, c.seconds, c.milliseconds),
                       (0, 1, 0, 0, 0));
            assert!(!c.negative);
        }

        #[test]
        fn negative_keeps_parts_positive() {
            let c = Duration::of(-MILLIS_IN_HOUR - 31 * MILLIS_IN_MINUTE - 30_000).decompose();
            assert_eq!((c.days, c.hours, c.minutes, c.seconds, c.milliseconds),
                       (0, 1, 31, 30, 0));
            assert!(c.negative);
        }

        #[test]
        fn many_days() {
            let c = Duration::of(3 * 86_400_000 + 4 * MILLIS_IN_HOUR + 567).decompose();
            assert_eq!((c.days, c.hours, c.minutes, c.seconds, c.milliseconds),
                       (3, 4, 0, 0, 567));
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn iso_hour() {
            assert_eq!(Duration::of(3_600_000).iso(), "0:01:00:00.000");
        }

        #[test]
        fn iso_negative() {
            assert_eq!(Duration::of(-5_490_000).iso(), "-0:01:31:30.000");
        }

        #[test]
        fn iso_zero() {
            assert_eq!(Duration::zero().iso(), "0:00:00:00.000");
        }

        #[test]
        fn long_hour() {
            assert_eq!(Duration::of(3_600_000).long_form(),
                       "0 days, 1 hours, 0 minutes, 0.0 seconds");
        }

        #[test]
        fn long_literal_milliseconds() {
            // The fraction is the raw remainder, so fifty milliseconds is
            // “.50”, not “.050”.
            assert_eq!(Duration::of(1_050).long_form(),
                       "0 days, 0 hours, 0 minutes, 1.50 seconds");
        }

        #[test]
        fn long_negative() {
            assert_eq!(Duration::of(-90_061_000).long_form(),
                       "-1 days, 1 hours, 1 minutes, 1.0 seconds");
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn addition() {
            assert_eq!(Duration::of(10), Duration::of(2) + Duration::of(8));
        }

        #[test]
        fn subtraction() {
            assert_eq!(Duration::of(13), Duration::of(28) - Duration::of(15));
        }

        #[test]
        fn multiplication() {
            assert_eq!(Duration::of_seconds(16), Duration::of_seconds(8) * 2);
        }

        #[test]
        fn negation() {
            assert_eq!(-Duration::of(250), Duration::of(-250));
        }
    }
}
