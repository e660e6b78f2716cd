//! Turning strings into instants.

use std::error::Error as ErrorTrait;
use std::fmt;

use crate::cal::{CivilDate, CivilDateTime, CivilTime, Month, Weekday};
use crate::instant::Instant;


/// Parses an ISO-8601 date or datetime string into an instant, read as
/// UTC unless the string carries its own offset. A single space between
/// the date and time parts is accepted in place of the `T`, as the data
/// this library grew up around wrote its timestamps that way.
///
/// ```
/// use datespan::parse::parse;
///
/// assert!(parse("2015-06-26").is_ok());
/// assert!(parse("2001-02-03T04:05:06+07:00").is_ok());
/// assert_eq!(parse("2024-12-27 13:30:00"), parse("2024-12-27T13:30:00"));
/// ```
///
/// Anything that doesn’t parse to a determinate instant is an error that
/// names the offending input:
///
/// ```
/// use datespan::parse::parse;
///
/// let error = parse("cuca").unwrap_err();
/// assert_eq!(error.to_string(), "Could not parse date: cuca");
/// ```
pub fn parse(input: &str) -> Result<Instant, Error> {
    let normalized = normalize_separator(input);

    if normalized.contains('T') {
        if let Ok(fields) = iso8601::datetime(&normalized) {
            return instant_from_fields(fields).ok_or_else(|| Error::unparseable(input));
        }
    }
    else if let Ok(fields) = iso8601::date(&normalized) {
        return date_from_fields(fields)
            .map(|date| CivilDateTime::new(date, CivilTime::midnight()).to_instant())
            .ok_or_else(|| Error::unparseable(input));
    }

    Err(Error::unparseable(input))
}

/// Replaces a single space between the date and time parts with the `T`
/// the ISO-8601 grammar wants. Inputs with no space, or with anything
/// stranger going on, come back unchanged and take their chances.
fn normalize_separator(input: &str) -> String {
    input.replacen(' ', "T", 1)
}

fn instant_from_fields(fields: iso8601::DateTime) -> Option<Instant> {
    let date = date_from_fields(fields.date)?;
    let time = CivilTime::hms_ms(
        fields.time.hour as i8,
        fields.time.minute as i8,
        fields.time.second as i8,
        fields.time.millisecond as i16).ok()?;

    // A parsed offset means the fields are local to some zone, so the
    // instant they pin down is that far away from the fields-as-UTC.
    let offset_millis = (i64::from(fields.time.tz_offset_hours) * 3_600
                       + i64::from(fields.time.tz_offset_minutes) * 60) * 1_000;

    Some(CivilDateTime::new(date, time).to_instant().shift(-offset_millis))
}

fn date_from_fields(fields: iso8601::Date) -> Option<CivilDate> {
    match fields {
        iso8601::Date::YMD { year, month, day } => {
            let month = Month::from_one(month as i8).ok()?;
            CivilDate::ymd(i64::from(year), month, day as i8).ok()
        }
        iso8601::Date::Week { year, ww, d } => {
            let weekday = Weekday::from_one(d as i8).ok()?;
            CivilDate::ywd(i64::from(year), i64::from(ww), weekday).ok()
        }
        iso8601::Date::Ordinal { year, ddd } => {
            CivilDate::yd(i64::from(year), i64::from(ddd)).ok()
        }
    }
}


#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Error {

    /// The input does not describe a determinate instant.
    Unparseable(String),
}

impl Error {
    fn unparseable(input: &str) -> Self {
        Self::Unparseable(input.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unparseable(ref input) => write!(f, "Could not parse date: {}", input),
        }
    }
}

impl ErrorTrait for Error {
}
