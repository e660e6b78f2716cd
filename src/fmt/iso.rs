//! Fixed ISO-8601 renderings of calendar values.

use std::fmt;

use crate::cal::{CivilDate, CivilDateTime, CivilTime, DatePiece, TimePiece};
use crate::instant::Instant;


/// Values that have one canonical ISO-8601 rendering.
pub trait Iso {

    /// Renders this value as an ISO-8601 string.
    fn iso(&self) -> String;
}

impl Iso for CivilDate {
    fn iso(&self) -> String {
        let year = self.year();
        if (0..10_000).contains(&year) {
            format!("{:04}-{:02}-{:02}", year, self.month() as i32, self.day())
        }
        else {
            format!("{:+05}-{:02}-{:02}", year, self.month() as i32, self.day())
        }
    }
}

impl Iso for CivilTime {
    fn iso(&self) -> String {
        format!("{:02}:{:02}:{:02}.{:03}", self.hour(), self.minute(), self.second(), self.millisecond())
    }
}

impl Iso for CivilDateTime {
    fn iso(&self) -> String {
        format!("{}T{}", self.date().iso(), self.time().iso())
    }
}

/// Renders an instant as the ISO-8601 string of its UTC calendar fields,
/// with a trailing `Z`. Returns `None` for the invalid instant.
pub fn utc_iso(instant: Instant) -> Option<String> {
    CivilDateTime::from_instant(instant).map(|fields| format!("{}Z", fields.iso()))
}


impl fmt::Debug for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CivilDate({})", self.iso())
    }
}

impl fmt::Debug for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CivilTime({})", self.iso())
    }
}

impl fmt::Debug for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CivilDateTime({})", self.iso())
    }
}
