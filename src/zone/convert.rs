//! Shifting instants into and out of zone-local readings, and rendering
//! them against a zone.
//!
//! Everything here comes in two flavours: a method on [`ZoneResolver`]
//! for callers holding their own resolver, and a free function that goes
//! through the process-wide one. Both resolve the zone on every call —
//! which is just a cache lookup after the first — except for
//! [`local_iso_formatter`], which resolves once and hands back a closure
//! for formatting many instants against the same zone.

use crate::instant::Instant;

use super::{resolve, Error, ZoneCache, ZoneEntry, ZoneResolver};


impl<C: ZoneCache> ZoneResolver<C> {

    /// The zone’s millisecond offset, as stored on its [`ZoneEntry`].
    pub fn offset_millis(&self, timezone: &str) -> Result<i64, Error> {
        Ok(self.resolve(timezone)?.offset_millis())
    }

    /// Reinterprets a wall-clock value that was parsed as if it were UTC
    /// but was really a reading taken in the given zone, producing the
    /// true UTC instant: the zone’s offset is subtracted from the raw
    /// value.
    pub fn correct_for_timezone(&self, date: Instant, timezone: &str) -> Result<Instant, Error> {
        Ok(date.shift(-self.resolve(timezone)?.offset_millis()))
    }

    /// Adds the zone’s offset to the raw value — the exact inverse of
    /// [`correct_for_timezone`](ZoneResolver::correct_for_timezone), and
    /// the operation that produces the *epoch-shifted* instants that
    /// [`to_epoch_shifted_iso`](ZoneResolver::to_epoch_shifted_iso)
    /// renders.
    pub fn epoch_shift(&self, date: Instant, timezone: &str) -> Result<Instant, Error> {
        Ok(date.shift(self.resolve(timezone)?.offset_millis()))
    }

    /// Reinterprets a wall-clock reading taken in `source_timezone`,
    /// un-localizing it from `local_timezone` first: the composition of
    /// an epoch shift by the source zone and a correction by the local
    /// one.
    pub fn correct_for_other_timezone(&self, date: Instant, source_timezone: &str, local_timezone: &str) -> Result<Instant, Error> {
        let shifted = self.epoch_shift(date, source_timezone)?;
        self.correct_for_timezone(shifted, local_timezone)
    }

    /// Renders a true UTC instant as the ISO-8601 string of its local
    /// wall-clock reading in the zone, with the offset appended, and the
    /// local weekday’s abbreviation after it if asked for.
    pub fn to_local_iso(&self, date: Instant, timezone: &str, include_weekday: bool) -> Result<String, Error> {
        let entry = self.resolve(timezone)?;
        render_local(&entry, date, include_weekday)
    }

    /// Resolves the zone once and returns a formatting closure, for
    /// rendering many instants without a cache lookup per call. The
    /// closure yields `None` for the invalid instant.
    pub fn local_iso_formatter(&self, timezone: &str, include_weekday: bool) -> Result<impl Fn(Instant) -> Option<String>, Error> {
        let entry = self.resolve(timezone)?;
        Ok(move |date| render_with(&entry, date, include_weekday))
    }

    /// Renders an already-epoch-shifted instant: its raw fields as they
    /// stand, suffixed with the zone’s static offset string.
    pub fn to_epoch_shifted_iso(&self, date: Instant, timezone: &str) -> Result<String, Error> {
        self.resolve(timezone)?.epoch_shifted_iso(date).ok_or(Error::InvalidInstant)
    }
}


/// The zone’s millisecond offset from UTC at the reference instant.
///
/// ```
/// use datespan::zone;
///
/// assert_eq!(zone::offset_millis("america/chicago").unwrap(), 21_600_000);
/// ```
pub fn offset_millis(timezone: &str) -> Result<i64, Error> {
    Ok(resolve(timezone)?.offset_millis())
}

/// Reinterprets a wall-clock value parsed as if UTC but really read in
/// the given zone, producing the true UTC instant.
pub fn correct_for_timezone(date: Instant, timezone: &str) -> Result<Instant, Error> {
    Ok(date.shift(-resolve(timezone)?.offset_millis()))
}

/// Adds the zone’s offset to the instant’s raw value; the exact inverse
/// of [`correct_for_timezone`].
///
/// ```
/// use datespan::zone;
/// use datespan::Instant;
///
/// let date = Instant::at(1_735_306_200_000);
/// let there = zone::epoch_shift(date, "Europe/Berlin").unwrap();
/// let back = zone::correct_for_timezone(there, "Europe/Berlin").unwrap();
/// assert_eq!(back, date);
/// ```
pub fn epoch_shift(date: Instant, timezone: &str) -> Result<Instant, Error> {
    Ok(date.shift(resolve(timezone)?.offset_millis()))
}

/// Reinterprets a wall-clock reading taken in `source_timezone`,
/// un-localizing it from `local_timezone` first.
pub fn correct_for_other_timezone(date: Instant, source_timezone: &str, local_timezone: &str) -> Result<Instant, Error> {
    correct_for_timezone(epoch_shift(date, source_timezone)?, local_timezone)
}

/// Renders a true UTC instant as its local wall-clock ISO-8601 reading
/// in the zone.
///
/// ```
/// use datespan::{parse, zone};
///
/// let date = parse::parse("2024-12-27 13:30:00").unwrap();
/// assert_eq!(zone::to_local_iso(date, "america/Chicago", false).unwrap(),
///            "2024-12-27T07:30:00.000-06:00");
/// ```
pub fn to_local_iso(date: Instant, timezone: &str, include_weekday: bool) -> Result<String, Error> {
    let entry = resolve(timezone)?;
    render_local(&entry, date, include_weekday)
}

/// Resolves the zone once through the process-wide resolver and returns
/// a reusable formatting closure.
pub fn local_iso_formatter(timezone: &str, include_weekday: bool) -> Result<impl Fn(Instant) -> Option<String>, Error> {
    let entry = resolve(timezone)?;
    Ok(move |date| render_with(&entry, date, include_weekday))
}

/// Renders an already-epoch-shifted instant with the zone’s static
/// offset string appended.
pub fn to_epoch_shifted_iso(date: Instant, timezone: &str) -> Result<String, Error> {
    resolve(timezone)?.epoch_shifted_iso(date).ok_or(Error::InvalidInstant)
}


fn render_with(entry: &ZoneEntry, date: Instant, include_weekday: bool) -> Option<String> {
    if include_weekday {
        entry.local_iso_with_weekday(date)
    }
    else {
        entry.local_iso(date)
    }
}

fn render_local(entry: &ZoneEntry, date: Instant, include_weekday: bool) -> Result<String, Error> {
    render_with(entry, date, include_weekday).ok_or(Error::InvalidInstant)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::parse::parse;

    fn date(input: &str) -> Instant {
        parse(input).unwrap()
    }

    mod shifting {
        use super::*;

        #[test]
        fn correcting_subtracts_the_offset() {
            // A reading of 13:30 taken in Chicago corrects to 07:30.
            let corrected = correct_for_timezone(date("2024-12-27T13:30:00"), "America/Chicago").unwrap();
            assert_eq!(corrected, date("2024-12-27T07:30:00"));
        }

        #[test]
        fn shifting_adds_it() {
            let shifted = epoch_shift(date("2024-12-27T13:30:00"), "America/Chicago").unwrap();
            assert_eq!(shifted, date("2024-12-27T19:30:00"));
        }

        #[test]
        fn round_trips() {
            for zone in ["America/Chicago", "Europe/Berlin", "Asia/Kathmandu", "UTC"] {
                let instant = date("2024-12-27T13:30:00");
                let there_and_back = correct_for_timezone(epoch_shift(instant, zone).unwrap(), zone).unwrap();
                assert_eq!(there_and_back, instant);
            }
        }

        #[test]
        fn between_two_zones() {
            let instant = date("2024-12-27T13:30:00");
            let composed = correct_for_other_timezone(instant, "Europe/Berlin", "America/Chicago").unwrap();

            let by_hand = correct_for_timezone(
                epoch_shift(instant, "Europe/Berlin").unwrap(),
                "America/Chicago").unwrap();
            assert_eq!(composed, by_hand);

            // Berlin leads Chicago by seven hours at the reference date.
            assert_eq!(composed, date("2024-12-27T18:30:00"));
        }

        #[test]
        fn invalid_stays_invalid() {
            let shifted = epoch_shift(Instant::invalid(), "Europe/Berlin").unwrap();
            assert!(!shifted.is_valid());
        }

        #[test]
        fn unknown_zone_refused() {
            assert_eq!(correct_for_timezone(date("2024-12-27"), "Nowhere/Special"),
                       Err(Error::UnrecognizedZone("Nowhere/Special".to_string())));
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn local_iso() {
            assert_eq!(to_local_iso(date("2024-12-27 13:30:00"), "america/Chicago", false).unwrap(),
                       "2024-12-27T07:30:00.000-06:00");
        }

        #[test]
        fn local_iso_ahead_of_utc() {
            assert_eq!(to_local_iso(date("2024-12-27 13:30:00"), "Europe/Berlin", false).unwrap(),
                       "2024-12-27T14:30:00.000+01:00");
        }

        #[test]
        fn with_weekday() {
            assert_eq!(to_local_iso(date("2024-12-27 13:30:00"), "America/Chicago", true).unwrap(),
                       "2024-12-27T07:30:00.000-06:00 - Fri");
        }

        #[test]
        fn epoch_shifted() {
            let shifted = epoch_shift(date("2024-12-27T07:30:00"), "UTC").unwrap();
            assert_eq!(to_epoch_shifted_iso(shifted, "America/Chicago").unwrap(),
                       "2024-12-27T07:30:00.000-06:00");
        }

        #[test]
        fn invalid_refused() {
            assert_eq!(to_local_iso(Instant::invalid(), "UTC", false),
                       Err(Error::InvalidInstant));
        }
    }

    mod formatter {
        use super::*;

        #[test]
        fn reusable() {
            let format = local_iso_formatter("America/Chicago", false).unwrap();
            assert_eq!(format(date("2024-12-27T13:30:00")).unwrap(),
                       "2024-12-27T07:30:00.000-06:00");
            assert_eq!(format(date("2024-12-28T13:30:00")).unwrap(),
                       "2024-12-28T07:30:00.000-06:00");
        }

        #[test]
        fn with_weekdays() {
            let format = local_iso_formatter("UTC", true).unwrap();
            assert_eq!(format(date("2024-12-27T13:30:00")).unwrap(),
                       "2024-12-27T13:30:00.000+00:00 - Fri");
        }

        #[test]
        fn agrees_with_the_one_shot_form() {
            let format = local_iso_formatter("Europe/Berlin", false).unwrap();
            let instant = date("2024-06-15T09:00:00");
            assert_eq!(format(instant),
                       to_local_iso(instant, "Europe/Berlin", false).ok());
        }

        #[test]
        fn nothing_from_nothing() {
            let format = local_iso_formatter("UTC", false).unwrap();
            assert_eq!(format(Instant::invalid()), None);
        }

        #[test]
        fn refuses_bad_zones_up_front() {
            assert!(local_iso_formatter("Atlantis/Central", false).is_err());
        }
    }
}
