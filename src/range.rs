//! Ranges between two instants, and the algebra over them.

use std::error::Error as ErrorTrait;
use std::fmt;

use once_cell::sync::Lazy;

use crate::cal::CivilDateTime;
use crate::delta::Delta;
use crate::duration::Duration;
use crate::fmt::{utc_iso, DateFormat};
use crate::instant::Instant;


/// A **date range** pairs a start instant with an end instant, along with
/// an optional payload of the holder’s choosing.
///
/// The start never comes after the end: constructors and
/// [`reinitialize`](DateRange::reinitialize) silently swap boundaries
/// given in reverse order, so `duration` can’t go negative.
///
/// Containment and overlap make an intentionally asymmetric pair:
/// [`contains`](DateRange::contains) is inclusive at both ends, while
/// [`overlaps`](DateRange::overlaps) is strict, so two ranges meeting at
/// a shared boundary instant both *contain* that instant yet do not
/// *overlap*.
///
/// ```
/// use datespan::{parse, DateRange};
///
/// let dec = DateRange::new(parse::parse("2024-12-01").unwrap(),
///                          parse::parse("2025-01-01").unwrap());
/// let jan = DateRange::new(parse::parse("2025-01-01").unwrap(),
///                          parse::parse("2025-02-01").unwrap());
///
/// assert!(dec.contains(parse::parse("2025-01-01").unwrap()));
/// assert!(!dec.overlaps(&jan));
/// ```
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct DateRange<T = ()> {
    start: Instant,
    end: Instant,
    data: Option<T>,
}

fn ordered(a: Instant, b: Instant) -> (Instant, Instant) {
    if b < a { (b, a) } else { (a, b) }
}

impl DateRange<()> {

    /// Creates a range between the two instants, swapping them if they
    /// arrive in reverse order.
    pub fn new(start: Instant, end: Instant) -> Self {
        let (start, end) = ordered(start, end);
        Self { start, end, data: None }
    }

    /// Creates the range covering the whole UTC calendar day around the
    /// instant, from its first millisecond to its last.
    pub fn around_day(date: Instant) -> Self {
        Self::new(date.start_of_day(), date.end_of_day())
    }

    /// Builds the ranges between consecutive pairs of boundaries: `N`
    /// boundaries make `N − 1` ranges, and fewer than two make none at
    /// all.
    ///
    /// ```
    /// use datespan::{DateRange, Delta, Instant};
    /// use datespan::iter::arrange;
    ///
    /// let mondays = arrange(Instant::at_epoch(), 3, &Delta::new().days(7)).unwrap();
    /// let weeks = DateRange::from_list(&mondays);
    /// assert_eq!(weeks.len(), 3);
    /// ```
    pub fn from_list(boundaries: &[Instant]) -> Vec<Self> {
        boundaries.windows(2)
                  .map(|pair| Self::new(pair[0], pair[1]))
                  .collect()
    }
}

impl<T> DateRange<T> {

    /// Creates a range carrying a payload. The payload is stored as
    /// given, with no copying or inspection.
    pub fn with_data(start: Instant, end: Instant, data: T) -> Self {
        let (start, end) = ordered(start, end);
        Self { start, end, data: Some(data) }
    }

    /// Like [`from_list`](DateRange::from_list), but each range gets a
    /// payload from a fresh invocation of the factory — one call per
    /// range, so the payloads are not shared.
    pub fn from_list_with<F>(boundaries: &[Instant], mut factory: F) -> Vec<Self>
    where F: FnMut() -> T
    {
        boundaries.windows(2)
                  .map(|pair| Self::with_data(pair[0], pair[1], factory()))
                  .collect()
    }

    /// The earlier boundary.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// The later boundary.
    pub fn end(&self) -> Instant {
        self.end
    }

    /// A look at the payload, if the range carries one.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Mutable access to the payload.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Replaces both boundaries and the payload in one go, with the same
    /// swap-if-reversed treatment as construction. Unlike construction,
    /// reinitializing demands valid boundaries, and refuses invalid ones
    /// before touching anything.
    pub fn reinitialize(&mut self, start: Instant, end: Instant, data: Option<T>) -> Result<(), Error> {
        if !start.is_valid() || !end.is_valid() {
            return Err(Error::InvalidBoundary);
        }

        let (start, end) = ordered(start, end);
        self.start = start;
        self.end = end;
        self.data = data;
        Ok(())
    }

    /// Returns whether both boundaries hold determinate time values.
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// Returns whether the instant falls within this range, *inclusive*
    /// of both boundaries. Always false for an invalid instant or an
    /// invalid range.
    pub fn contains(&self, instant: Instant) -> bool {
        instant.is_valid() && self.is_valid()
            && self.start <= instant && instant <= self.end
    }

    /// Returns whether the two ranges share any span of time, with
    /// *strict* comparisons at the boundaries: ranges that only touch do
    /// not overlap. Symmetric in its arguments, and always false if
    /// either range is invalid.
    pub fn overlaps<U>(&self, other: &DateRange<U>) -> bool {
        self.is_valid() && other.is_valid()
            && self.end > other.start && self.start < other.end
    }

    /// The length of time this range covers, never negative thanks to
    /// the ordering invariant. `None` for an invalid range.
    pub fn duration(&self) -> Option<Duration> {
        self.end.since(self.start)
    }

    /// The duration in its compact `D:HH:MM:SS.mmm` rendering.
    pub fn duration_iso(&self) -> Option<String> {
        self.duration().map(Duration::iso)
    }

    /// The duration in its spelled-out long-form rendering.
    pub fn duration_long(&self) -> Option<String> {
        self.duration().map(Duration::long_form)
    }

    /// Shifts the start boundary by the delta, mutating this range in
    /// place and preserving its identity; the boundaries re-order
    /// themselves if the shift carries the start past the end.
    pub fn shift_start_in_place(&mut self, delta: &Delta) -> &mut Self {
        let (start, end) = ordered(self.start.add(delta), self.end);
        self.start = start;
        self.end = end;
        self
    }

    /// Shifts the end boundary by the delta, mutating this range in
    /// place.
    pub fn shift_end_in_place(&mut self, delta: &Delta) -> &mut Self {
        let (start, end) = ordered(self.start, self.end.add(delta));
        self.start = start;
        self.end = end;
        self
    }

    /// Returns a new range with the start boundary shifted by the delta,
    /// leaving this one untouched. The payload comes along by clone.
    pub fn with_shifted_start(&self, delta: &Delta) -> Self
    where T: Clone
    {
        let (start, end) = ordered(self.start.add(delta), self.end);
        Self { start, end, data: self.data.clone() }
    }

    /// Returns a new range with the end boundary shifted by the delta.
    pub fn with_shifted_end(&self, delta: &Delta) -> Self
    where T: Clone
    {
        let (start, end) = ordered(self.start, self.end.add(delta));
        Self { start, end, data: self.data.clone() }
    }

    /// Renders both boundaries through the compiled locale formatter,
    /// joined by ` to `.
    pub fn to_locale_string(&self) -> String {
        format!("{} to {}", locale_boundary(self.start), locale_boundary(self.end))
    }
}

/// The pattern behind [`DateRange::to_locale_string`], compiled once.
/// The pattern is a constant that’s known to parse.
static LOCALE_FORMAT: Lazy<DateFormat<'static>> =
    Lazy::new(|| DateFormat::parse("{:a} {:D} {:b} {:Y}, {0 2:H}:{0 2:i}:{0 2:s}").unwrap());

fn locale_boundary(instant: Instant) -> String {
    match CivilDateTime::from_instant(instant) {
        Some(fields) => LOCALE_FORMAT.format(&fields, &locale::Time::english()),
        None => "invalid".to_string(),
    }
}

fn iso_boundary(instant: Instant) -> String {
    utc_iso(instant).unwrap_or_else(|| "invalid".to_string())
}

impl<T> fmt::Display for DateRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", iso_boundary(self.start), iso_boundary(self.end))
    }
}


#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Error {

    /// An invalid instant was given as a range boundary where only a
    /// valid one will do.
    InvalidBoundary,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range boundary is not a valid instant")
    }
}

impl ErrorTrait for Error {
}
