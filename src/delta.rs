//! Shifting instants by calendar and fixed-length increments.

use crate::cal::{self, CivilDateTime, DatePiece, Month, TimePiece};
use crate::duration::MILLIS_IN_DAY;
use crate::instant::Instant;


/// A **delta** is a bundle of increments to apply to an instant: some
/// fixed-length (days, hours, minutes, seconds), some calendar-aware
/// (years, months).
///
/// The calendar fields are optional rather than defaulting to zero,
/// because *presence* is what switches the calendar machinery on — this
/// keeps “no months given” distinguishable from “zero months given”, a
/// distinction the arithmetic below preserves even though the two happen
/// to produce the same result today.
///
/// A delta is built up with its chaining methods:
///
/// ```
/// use datespan::Delta;
///
/// let step = Delta::new().months(1).days(2).hours(3);
/// assert_eq!(step.months, Some(1));
/// assert_eq!(step.years, None);
/// assert_eq!(step.days, 2);
/// ```
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Delta {
    pub years: Option<i64>,
    pub months: Option<i64>,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Delta {

    /// Creates an empty delta, which shifts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(mut self, years: i64) -> Self {
        self.years = Some(years);
        self
    }

    pub fn months(mut self, months: i64) -> Self {
        self.months = Some(months);
        self
    }

    pub fn days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    pub fn hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    pub fn minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    /// The fixed-length part of this delta, in milliseconds.
    fn fixed_millis(&self) -> i64 {
        self.days * MILLIS_IN_DAY
            + self.hours * 3_600_000
            + self.minutes * 60_000
            + self.seconds * 1_000
    }
}


impl Instant {

    /// Returns this instant shifted by the given delta. The fixed-length
    /// components are applied first as one millisecond displacement; the
    /// calendar components follow, years before months, each applied as a
    /// field increment on the UTC calendar fields. A day-of-month that the
    /// target month doesn’t have rolls forward into the following month,
    /// so the 31st of January plus one month lands early in March.
    ///
    /// Shifting the invalid instant yields the invalid instant.
    ///
    /// ```
    /// use datespan::{parse, Delta};
    ///
    /// let date = parse::parse("2024-01-31").unwrap();
    /// let later = date.add(&Delta::new().months(1));
    /// assert_eq!(later, parse::parse("2024-03-02").unwrap());
    /// ```
    pub fn add(self, delta: &Delta) -> Self {
        let mut result = self.shift(delta.fixed_millis());

        if let Some(years) = delta.years {
            result = shift_calendar(result, years, 0);
        }

        if let Some(months) = delta.months {
            result = shift_calendar(result, 0, months);
        }

        result
    }
}

/// Increments the year and month fields of the instant’s UTC calendar
/// reading, leaving the day and time-of-day fields alone, then converts
/// back. Month overflow wraps into the year; day overflow rolls into the
/// following month.
fn shift_calendar(instant: Instant, years: i64, months: i64) -> Instant {
    let fields = match CivilDateTime::from_instant(instant) {
        Some(fields) => fields,
        None => return instant,
    };

    let total_months = fields.month().months_from_january() as i64 + months;
    let (carried_years, month_index) = crate::duration::divide_remainder(total_months, 12);

    // The month index is 0..12 after the division above.
    let month = Month::from_zero(month_index as i8).unwrap();
    let year = fields.year() + years + carried_years;

    let days = cal::raw_days_since_epoch(year, month, i64::from(fields.day()));
    Instant::at(days * MILLIS_IN_DAY + fields.time().millis_since_midnight())
}
