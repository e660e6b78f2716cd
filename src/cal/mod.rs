//! The civil Gregorian calendar: years, months, days, and the conversions
//! between instants and broken-out calendar fields.

use std::cmp::Ordering;
use std::error::Error as ErrorTrait;
use std::fmt;

use crate::duration::{divide_remainder, MILLIS_IN_DAY};
use crate::instant::Instant;

use self::Month::*;
use self::Weekday::*;


/// Number of days guaranteed to be in four years.
const DAYS_IN_4Y: i64 = 365 * 4 + 1;

/// Number of days guaranteed to be in a hundred years.
const DAYS_IN_100Y: i64 = 365 * 100 + 24;

/// Number of days guaranteed to be in four hundred years.
const DAYS_IN_400Y: i64 = 365 * 400 + 97;

/// Number of days between **1st January, 1970** and **1st March, 2000**.
///
/// The internal calculations use the latter date as their reference point,
/// rather than the Unix epoch. Putting the reference immediately after a
/// possible leap-year day, on a year that’s a multiple of 400, reduces the
/// day-to-date conversion to plain division over the Gregorian calendar’s
/// 400-year cycle. Instants still count from 1970, so this difference gets
/// added or subtracted at the boundary, and the value never escapes to
/// users of this library.
const EPOCH_DIFFERENCE: i64 = 30 * 365   // 30 years between 2000 and 1970...
                            + 7          // plus seven days for leap years...
                            + 31 + 29;   // plus all the days in January and February in 2000.

/// This rather strange triangle is an array of the number of days elapsed
/// at the end of each month, starting at the beginning of March (the first
/// month after the reference point above), going backwards, ignoring
/// February.
const TIME_TRIANGLE: &[i64; 11] =
    &[31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31 + 31,  // January
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,  // December
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,  // November
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,  // October
      31 + 30 + 31 + 30 + 31 + 31 + 30,  // September
      31 + 30 + 31 + 30 + 31 + 31,  // August
      31 + 30 + 31 + 30 + 31,  // July
      31 + 30 + 31 + 30,  // June
      31 + 30 + 31,  // May
      31 + 30,  // April
      31]; // March


/// Split a number of periods into a number of cycles, and the number of
/// periods left over that don’t fit into a cycle.
///
/// This is essentially a division operation with the result and the
/// remainder, with the difference that a negative value gets ‘wrapped
/// around’ to be a positive value, owing to the way the modulo operator
/// works for negative values.
fn split_cycles(number_of_periods: i64, cycle_length: i64) -> (i64, i64) {
    divide_remainder(number_of_periods, cycle_length)
}


/// A single year.
///
/// This is just a wrapper around `i64` that performs year-related tests.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub struct Year(pub i64);

impl Year {

    /// Returns whether this year is a leap year.
    ///
    /// ```
    /// use datespan::cal::Year;
    ///
    /// assert_eq!(Year(2000).is_leap_year(), true);
    /// assert_eq!(Year(1900).is_leap_year(), false);
    /// ```
    pub fn is_leap_year(self) -> bool {
        self.leap_year_calculations().1
    }

    /// Returns the number of days in this year.
    pub fn day_count(self) -> i64 {
        if self.is_leap_year() { 366 } else { 365 }
    }

    /// Performs two related calculations for leap years, returning the
    /// results as a two-part tuple:
    ///
    /// 1. The number of leap years that have elapsed prior to this year;
    /// 2. Whether this year is a leap year or not.
    fn leap_year_calculations(self) -> (i64, bool) {
        let year = self.0 - 2000;

        let (num_400y_cycles, mut remainder) = split_cycles(year, 400);

        // Standard leap-year calculations, performed on the remainder
        let currently_leap_year = remainder == 0 || (remainder % 100 != 0 && remainder % 4 == 0);

        let num_100y_cycles = remainder / 100;
        remainder -= num_100y_cycles * 100;

        let leap_years_elapsed = remainder / 4
            + 97 * num_400y_cycles  // There are 97 leap years in 400 years
            + 24 * num_100y_cycles  // There are 24 leap years in 100 years
            - if currently_leap_year { 1 } else { 0 };

        (leap_years_elapsed, currently_leap_year)
    }
}


/// A month of the year, starting with January, and ending with December.
///
/// This is stored as an enum instead of just a number to prevent
/// off-by-one errors: is month 2 February (1-indexed) or March (0-indexed)?
/// In this case, it’s 1-indexed, to have January become 1 when you use
/// `as i32` in code.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
pub enum Month {
    January =  1, February =  2, March     =  3,
    April   =  4, May      =  5, June      =  6,
    July    =  7, August   =  8, September =  9,
    October = 10, November = 11, December  = 12,
}

impl Month {

    /// Returns the number of days in this month, depending on whether it’s
    /// a leap year or not.
    pub fn days_in_month(self, leap_year: bool) -> i8 {
        match self {
            January   => 31, February  => if leap_year { 29 } else { 28 },
            March     => 31, April     => 30,
            May       => 31, June      => 30,
            July      => 31, August    => 31,
            September => 30, October   => 31,
            November  => 30, December  => 31,
        }
    }

    /// Returns the number of days that have elapsed in a year *before* this
    /// month begins, with no leap year check.
    fn days_before_start(self) -> i16 {
        match self {
            January =>   0, February =>  31, March     =>  59,
            April   =>  90, May      => 120, June      => 151,
            July    => 181, August   => 212, September => 243,
            October => 273, November => 304, December  => 334,
        }
    }

    /// Returns how many months have elapsed in the year before this one.
    pub fn months_from_january(self) -> usize {
        self as usize - 1
    }

    /// Returns the month based on a number, with January as **Month 1**,
    /// February as **Month 2**, and so on.
    ///
    /// ```
    /// use datespan::Month;
    /// assert_eq!(Month::from_one(5), Ok(Month::May));
    /// assert!(Month::from_one(0).is_err());
    /// ```
    pub fn from_one(month: i8) -> Result<Self, Error> {
        Ok(match month {
             1 => January,   2 => February,   3 => March,
             4 => April,     5 => May,        6 => June,
             7 => July,      8 => August,     9 => September,
            10 => October,  11 => November,  12 => December,
             _ => return Err(Error::OutOfRange),
        })
    }

    /// Returns the month based on a number, with January as **Month 0**,
    /// February as **Month 1**, and so on.
    pub fn from_zero(month: i8) -> Result<Self, Error> {
        Self::from_one(month + 1)
    }
}


/// A named day of the week.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Weekday {
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
}

// Sunday is Day 0, which is pretty much an arbitrary choice; the only
// place the numbering leaks out is `days_from_sunday`, whose callers index
// into locale day-name tables that make the same choice.
//
// Weekdays get no Ord instance because there’s no real standard as to
// whether Sunday should come before Monday, or the other way around.
// Luckily, they don’t need one, as the field is ignored when comparing
// civil dates.

impl Weekday {

    /// Returns how many days have elapsed since Sunday, for indexing into
    /// week-based name tables.
    pub fn days_from_sunday(self) -> usize {
        match self {
            Sunday   => 0,  Monday    => 1,  Tuesday  => 2,
            Wednesday => 3, Thursday  => 4,  Friday   => 5,
            Saturday => 6,
        }
    }

    fn days_from_monday_as_one(self) -> i8 {
        match self {
            Sunday   => 7,  Monday    => 1,
            Tuesday  => 2,  Wednesday => 3,
            Thursday => 4,  Friday    => 5,
            Saturday => 6,
        }
    }

    /// Returns the conventional three-letter abbreviation of this weekday.
    pub fn abbrev(self) -> &'static str {
        match self {
            Sunday   => "Sun",  Monday    => "Mon",
            Tuesday  => "Tue",  Wednesday => "Wed",
            Thursday => "Thu",  Friday    => "Fri",
            Saturday => "Sat",
        }
    }

    /// Return the weekday based on a number, with Sunday as Day 0, Monday
    /// as Day 1, and so on.
    ///
    /// ```
    /// use datespan::Weekday;
    /// assert_eq!(Weekday::from_zero(4), Ok(Weekday::Thursday));
    /// assert!(Weekday::from_zero(7).is_err());
    /// ```
    pub fn from_zero(weekday: i8) -> Result<Self, Error> {
        Ok(match weekday {
            0 => Sunday,     1 => Monday,    2 => Tuesday,
            3 => Wednesday,  4 => Thursday,  5 => Friday,
            6 => Saturday,   _ => return Err(Error::OutOfRange),
        })
    }

    /// Return the weekday based on a number, with Monday as Day 1 and
    /// Sunday as Day 7, the ISO-8601 numbering.
    pub fn from_one(weekday: i8) -> Result<Self, Error> {
        Ok(match weekday {
            7 => Sunday,     1 => Monday,    2 => Tuesday,
            3 => Wednesday,  4 => Thursday,  5 => Friday,
            6 => Saturday,   _ => return Err(Error::OutOfRange),
        })
    }
}


/// A **civil date** is a day-long span on the timeline, described by its
/// calendar fields.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct CivilDate {
    year:    i64,
    month:   Month,
    day:     i8,
    yearday: i16,
    weekday: Weekday,
}

/// A **civil time** is a time of day that recurs once every day.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct CivilTime {
    hour:   i8,
    minute: i8,
    second: i8,
    millisecond: i16,
}

/// A **civil date-time** pairs a civil date with a civil time, pinning
/// down an exact instant when read as UTC.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct CivilDateTime {
    date: CivilDate,
    time: CivilTime,
}


/// Calculates the number of days that have elapsed between the 1st
/// January, 1970, and the given calendar fields, with **no validity check
/// on the day-of-month**: day values past the end of the month simply roll
/// forward into the following month. That tolerance is what the
/// calendar-increment arithmetic in [`crate::delta`] leans on.
pub(crate) fn raw_days_since_epoch(year: i64, month: Month, day: i64) -> i64 {
    let years = year - 2000;
    let (leap_days_elapsed, is_leap_year) = Year(year).leap_year_calculations();

    // Work out the number of days from the start of 1970 to now,
    // which is a multiple of the number of years...
    years * 365

        // Plus the number of days between the start of 2000 and the
        // start of 1970, to make up the difference because our
        // dates start at 2000 and instants start at 1970...
        + 10_958

        // Plus the number of leap years that have elapsed between
        // now and the start of 2000...
        + leap_days_elapsed

        // Plus the number of days in all the months leading up to
        // the current month...
        + i64::from(month.days_before_start())

        // Plus an extra leap day for *this* year...
        + if is_leap_year && month >= March { 1 } else { 0 }

        // Plus the number of days in the month so far! (Days are
        // 1-indexed, so we make them 0-indexed here)
        + (day - 1)
}

/// Computes the weekday, given the number of days that have passed since
/// the 2000-03-01 reference point.
fn days_to_weekday(days: i64) -> Weekday {
    // March 1st, 2000 was a Wednesday, so add 3 to the number of days.
    let weekday = (days + 3) % 7;

    // We can unwrap since the modulo above has already done the bounds
    // checking.
    Weekday::from_zero(if weekday < 0 { weekday + 7 } else { weekday } as i8).unwrap()
}


impl CivilDate {

    /// Creates a new civil date instance from the given year, month, and
    /// day fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an error.
    ///
    /// ```
    /// use datespan::{CivilDate, DatePiece, Month};
    ///
    /// let date = CivilDate::ymd(1969, Month::July, 20).unwrap();
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.month(), Month::July);
    /// assert_eq!(date.day(), 20);
    ///
    /// assert!(CivilDate::ymd(2100, Month::February, 29).is_err());
    /// ```
    pub fn ymd(year: i64, month: Month, day: i8) -> Result<Self, Error> {
        let (_, is_leap_year) = Year(year).leap_year_calculations();

        if day < 1 || day > month.days_in_month(is_leap_year) {
            return Err(Error::OutOfRange);
        }

        Ok(Self::from_days_since_epoch(raw_days_since_epoch(year, month, i64::from(day))))
    }

    /// Creates a new civil date instance from the given year and
    /// day-of-year values.
    ///
    /// The yearday is checked only for gross range; values at the edges
    /// roll into the neighbouring year, which the week-based constructor
    /// depends on.
    pub fn yd(year: i64, yearday: i64) -> Result<Self, Error> {
        if (0..367).contains(&yearday) {
            let jan_1 = raw_days_since_epoch(year, January, 1);
            Ok(Self::from_days_since_epoch(jan_1 + yearday - 1))
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Creates a new civil date instance from the given year,
    /// week-of-year, and weekday values.
    ///
    /// Note that according to the ISO-8601 standard, the resulting year
    /// may differ from the one passed in for dates early in week 1 or late
    /// in week 53.
    pub fn ywd(year: i64, week: i64, weekday: Weekday) -> Result<Self, Error> {
        let jan_4 = raw_days_since_epoch(year, January, 4);
        let correction = i64::from(days_to_weekday(jan_4 - EPOCH_DIFFERENCE).days_from_monday_as_one()) + 3;

        let yearday = 7 * week + i64::from(weekday.days_from_monday_as_one()) - correction;

        if yearday <= 0 {
            Self::yd(year - 1, Year(year - 1).day_count() + yearday)
        }
        else if yearday >= Year(year).day_count() {
            Self::yd(year + 1, yearday - Year(year).day_count())
        }
        else {
            Self::yd(year, yearday)
        }
    }

    /// Computes a civil date - year, month, day, weekday, and yearday -
    /// given the number of days that have passed since the 1st January,
    /// 1970.
    pub fn from_days_since_epoch(days: i64) -> Self {
        Self::from_cycle_days(days - EPOCH_DIFFERENCE)
    }

    /// The reverse of `from_days_since_epoch`.
    pub fn days_since_epoch(&self) -> i64 {
        raw_days_since_epoch(self.year, self.month, i64::from(self.day))
    }

    /// The actual conversion, taking the number of days that have passed
    /// since the 2000-03-01 reference point.
    fn from_cycle_days(days: i64) -> Self {

        // The Gregorian calendar works in 400-year cycles, which repeat
        // themselves ever after.
        //
        // This calculation works by finding the number of 400-year,
        // 100-year, and 4-year cycles, then constantly subtracting the
        // number of leftover days.
        let (num_400y_cycles, mut remainder) = split_cycles(days, DAYS_IN_400Y);

        // Calculate the numbers of 100-year cycles, 4-year cycles, and
        // leftover years, continually reducing the number of days left to
        // think about.
        let num_100y_cycles = remainder / DAYS_IN_100Y;
        remainder -= num_100y_cycles * DAYS_IN_100Y;  // remainder is now days left in this 100-year cycle

        let num_4y_cycles = remainder / DAYS_IN_4Y;
        remainder -= num_4y_cycles * DAYS_IN_4Y;  // remainder is now days left in this 4-year cycle

        let mut years = std::cmp::min(remainder / 365, 3);
        remainder -= years * 365;  // remainder is now days left in this year

        // Leap year calculation goes thusly:
        //
        // 1. If the year is a multiple of 400, it’s a leap year.
        // 2. Else, if the year is a multiple of 100, it’s *not* a leap year.
        // 3. Else, if the year is a multiple of 4, it’s a leap year again!
        //
        // We already have the values for the numbers of multiples at this
        // point, and it’s safe to re-use them.
        let days_this_year =
            if years == 0 && !(num_4y_cycles == 0 && num_100y_cycles != 0) { 366 }
                                                                      else { 365 };

        // Find out which number day of the year it is.
        // The 306 here refers to the number of days in a year excluding
        // January and February (which are excluded because of the
        // reference point)
        let mut day_of_year = remainder + days_this_year - 306;
        if day_of_year >= days_this_year {
            day_of_year -= days_this_year;  // wrap around for January and February
        }

        // Turn all those cycles into an actual number of years.
        years +=   4 * num_4y_cycles
               + 100 * num_100y_cycles
               + 400 * num_400y_cycles;

        // Work out the month and number of days into the month by scanning
        // the time triangle, finding the month that has the correct number
        // of days elapsed at the end of it.
        // (it’s “11 - index” below because the triangle goes backwards)
        let result = TIME_TRIANGLE.iter()
                                  .enumerate()
                                  .find(|&(_, days)| *days <= remainder);

        let (mut month, month_days) = match result {
            Some((index, days)) => (11 - index, remainder - *days),
            None => (0, remainder),  // No month found? Then it’s February.
        };

        // Need to add 2 to the month in order to compensate for the
        // reference point being in March.
        month += 2;

        if month >= 12 {
            years += 1;   // wrap around for January and February
            month -= 12;  // (yes, again)
        }

        // The check immediately above means we can `unwrap` this, as the
        // month number is guaranteed to be in the range (0..12).
        let month_variant = Month::from_zero(month as i8).unwrap();

        // Finally, adjust the day numbers for human reasons: the first day
        // of the month is the 1st, rather than the 0th, and the year needs
        // to be adjusted relative to the reference point.
        Self {
            yearday: (day_of_year + 1) as i16,
            weekday: days_to_weekday(days),
            year:    years + 2000,
            month:   month_variant,
            day:     (month_days + 1) as i8,
        }
    }
}

impl PartialOrd for CivilDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CivilDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}


impl CivilTime {

    /// Computes the hour, minute, second, and millisecond fields, based on
    /// the number of milliseconds that have elapsed since midnight.
    pub fn from_millis_since_midnight(millis: i64) -> Self {
        Self {
            hour:   (millis / 3_600_000) as i8,
            minute: (millis / 60_000 % 60) as i8,
            second: (millis / 1_000 % 60) as i8,
            millisecond: (millis % 1_000) as i16,
        }
    }

    /// Returns the time at midnight, with all fields initialised to 0.
    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0, second: 0, millisecond: 0 }
    }

    /// Creates a new timestamp instance with the given hour, minute, and
    /// second fields. The millisecond field is set to 0.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an `Err`.
    pub fn hms(hour: i8, minute: i8, second: i8) -> Result<Self, Error> {
        Self::hms_ms(hour, minute, second, 0)
    }

    /// Creates a new timestamp instance with the given hour, minute,
    /// second, and millisecond fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an `Err`.
    pub fn hms_ms(hour: i8, minute: i8, second: i8, millisecond: i16) -> Result<Self, Error> {
        if (0..24).contains(&hour) && (0..60).contains(&minute)
        && (0..60).contains(&second) && (0..1000).contains(&millisecond)
        {
            Ok(Self { hour, minute, second, millisecond })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Calculates the number of milliseconds since midnight this time is
    /// at.
    pub fn millis_since_midnight(&self) -> i64 {
        i64::from(self.hour) * 3_600_000
            + i64::from(self.minute) * 60_000
            + i64::from(self.second) * 1_000
            + i64::from(self.millisecond)
    }
}


impl CivilDateTime {

    /// Creates a new civil date-time from a civil date and a civil time.
    pub fn new(date: CivilDate, time: CivilTime) -> Self {
        Self { date, time }
    }

    /// Computes the complete set of calendar fields for the given instant,
    /// read as UTC. Returns `None` for the invalid instant, which has no
    /// fields to compute.
    pub fn from_instant(instant: Instant) -> Option<Self> {
        let millis = instant.millis()?;

        // Just split the input value into days and milliseconds, and let
        // CivilDate and CivilTime do all the hard work.
        let (days, millis_of_day) = split_cycles(millis, MILLIS_IN_DAY);

        Some(Self {
            date: CivilDate::from_days_since_epoch(days),
            time: CivilTime::from_millis_since_midnight(millis_of_day),
        })
    }

    /// The exact instant these fields describe, read as UTC.
    pub fn to_instant(&self) -> Instant {
        Instant::at(self.date.days_since_epoch() * MILLIS_IN_DAY + self.time.millis_since_midnight())
    }

    /// Returns the date portion of this date-time stamp.
    pub fn date(&self) -> CivilDate {
        self.date
    }

    /// Returns the time portion of this date-time stamp.
    pub fn time(&self) -> CivilTime {
        self.time
    }
}


/// The **date piece** trait is used for date and time values that have
/// date components of years, months, and days.
pub trait DatePiece {

    /// The year, in absolute terms.
    /// This is in human-readable format, so the year 2014 actually has a
    /// year value of 2014, rather than 14 or 114 or anything like that.
    fn year(&self) -> i64;

    /// The month of the year.
    fn month(&self) -> Month;

    /// The day of the month, from 1 to 31.
    fn day(&self) -> i8;

    /// The day of the year, from 1 to 366.
    fn yearday(&self) -> i16;

    /// The day of the week.
    fn weekday(&self) -> Weekday;

    /// The number of years into the century.
    /// This is the same as the last two digits of the year.
    fn year_of_century(&self) -> i64 { self.year() % 100 }
}

/// The **time piece** trait is used for date and time values that have
/// time components of hours, minutes, and seconds.
pub trait TimePiece {

    /// The hour of the day.
    fn hour(&self) -> i8;

    /// The minute of the hour.
    fn minute(&self) -> i8;

    /// The second of the minute.
    fn second(&self) -> i8;

    /// The millisecond of the second.
    fn millisecond(&self) -> i16;
}

impl DatePiece for CivilDate {
    fn year(&self) -> i64 { self.year }
    fn month(&self) -> Month { self.month }
    fn day(&self) -> i8 { self.day }
    fn yearday(&self) -> i16 { self.yearday }
    fn weekday(&self) -> Weekday { self.weekday }
}

impl TimePiece for CivilTime {
    fn hour(&self) -> i8 { self.hour }
    fn minute(&self) -> i8 { self.minute }
    fn second(&self) -> i8 { self.second }
    fn millisecond(&self) -> i16 { self.millisecond }
}

impl DatePiece for CivilDateTime {
    fn year(&self) -> i64 { self.date.year }
    fn month(&self) -> Month { self.date.month }
    fn day(&self) -> i8 { self.date.day }
    fn yearday(&self) -> i16 { self.date.yearday }
    fn weekday(&self) -> Weekday { self.date.weekday }
}

impl TimePiece for CivilDateTime {
    fn hour(&self) -> i8 { self.time.hour }
    fn minute(&self) -> i8 { self.time.minute }
    fn second(&self) -> i8 { self.time.second }
    fn millisecond(&self) -> i16 { self.time.millisecond }
}


#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Error {
    OutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "calendar field out of range")
    }
}

impl ErrorTrait for Error {
}
