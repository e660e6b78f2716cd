//! Timezones, and the cached resolution of their UTC offsets.
//!
//! A timezone starts life as nothing but an identifier string, such as
//! `"America/Chicago"` or `"europe/berlin"` — identifiers are looked up
//! case-insensitively. Resolving one produces a [`ZoneEntry`], which pins
//! down the zone’s offset from UTC *at one fixed reference instant*
//! (midnight UTC on the 1st of January, 2025) and keeps it for the life of
//! the process. The offset is deliberately not recomputed for other
//! instants, so a zone that observes daylight-saving time reads as its
//! reference-date offset all year round.
//!
//! Entries are cached: resolving the same identifier twice hands back the
//! same allocation, however the identifier was capitalized. The cache
//! lives behind the [`ZoneCache`] trait so tests can resolve against an
//! isolated [`ZoneResolver`] rather than the process-wide one used by the
//! free functions in this module and in [`convert`].

pub mod convert;

pub use self::convert::{
    correct_for_other_timezone, correct_for_timezone, epoch_shift, local_iso_formatter,
    offset_millis, to_epoch_shifted_iso, to_local_iso,
};

use std::collections::HashMap;
use std::error::Error as ErrorTrait;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Offset as _, TimeZone as _};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use crate::cal::{CivilDateTime, DatePiece};
use crate::duration::Duration;
use crate::fmt::Iso;
use crate::instant::Instant;


/// The reference instant that offsets are computed at:
/// 2025-01-01T00:00:00Z, as milliseconds since the Unix epoch.
pub const REFERENCE_MILLIS: i64 = 1_735_689_600_000;


/// A resolved timezone: an identifier, the zone’s offset from UTC at the
/// reference instant, and the textual form of that offset.
///
/// The offset is stored as the difference `R − R′`, where `R` is the
/// reference instant and `R′` is the zone’s wall-clock reading of `R`
/// reparsed as though it were UTC. A zone *ahead* of UTC therefore stores
/// a negative number: Berlin in winter is `-3_600_000`, while Chicago is
/// `+21_600_000`. The rendered [`iso_offset`](ZoneEntry::iso_offset) flips
/// the sign back to the conventional one, so those two read `+01:00` and
/// `-06:00`.
///
/// Entries are immutable. The resolver wraps them in [`Arc`] and caches
/// them, so there is at most one entry per canonical identifier.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ZoneEntry {
    identifier: String,
    offset_millis: i64,
    iso_offset: String,
}

impl ZoneEntry {

    /// Looks the identifier up in the zone database and computes its
    /// offset at the reference instant.
    fn resolve(identifier: &str) -> Result<Self, Error> {
        let canonical = identifier.to_lowercase();

        let tz = Tz::from_str_insensitive(&canonical)
            .map_err(|_| Error::UnrecognizedZone(identifier.to_string()))?;

        // The reference instant is a constant comfortably inside the
        // range of representable chrono datetimes.
        let reference = chrono::DateTime::from_timestamp_millis(REFERENCE_MILLIS).unwrap();
        let east = i64::from(tz.offset_from_utc_datetime(&reference.naive_utc())
                               .fix()
                               .local_minus_utc()) * 1_000;

        let offset_millis = -east;

        Ok(Self {
            iso_offset: iso_offset_string(offset_millis),
            identifier: canonical,
            offset_millis,
        })
    }

    /// The canonical (lowercased) identifier this entry was resolved from.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The millisecond offset `R − R′` described above.
    pub fn offset_millis(&self) -> i64 {
        self.offset_millis
    }

    /// The `±HH:MM` rendering of the offset, in the conventional sign.
    pub fn iso_offset(&self) -> &str {
        &self.iso_offset
    }

    /// The calendar fields of the instant’s local wall-clock reading in
    /// this zone, or `None` for the invalid instant.
    fn local_fields(&self, instant: Instant) -> Option<CivilDateTime> {
        CivilDateTime::from_instant(instant.shift(-self.offset_millis))
    }

    /// Renders the instant — a true UTC one — as the ISO-8601 string of
    /// its local wall-clock reading in this zone, with the offset
    /// appended. Returns `None` for the invalid instant.
    pub fn local_iso(&self, instant: Instant) -> Option<String> {
        self.local_fields(instant)
            .map(|fields| format!("{}{}", fields.iso(), self.iso_offset))
    }

    /// Like [`local_iso`](ZoneEntry::local_iso), with the local weekday’s
    /// abbreviation appended after a ` - ` separator.
    pub fn local_iso_with_weekday(&self, instant: Instant) -> Option<String> {
        self.local_fields(instant)
            .map(|fields| format!("{}{} - {}", fields.iso(), self.iso_offset,
                                  fields.weekday().abbrev()))
    }

    /// The abbreviation of the weekday the instant falls on in this zone.
    pub fn weekday(&self, instant: Instant) -> Option<&'static str> {
        self.local_fields(instant).map(|fields| fields.weekday().abbrev())
    }

    /// Renders an instant that has *already* been shifted by this zone’s
    /// offset: its raw fields are printed as they stand, with the zone’s
    /// static offset string appended and no further shifting.
    pub fn epoch_shifted_iso(&self, instant: Instant) -> Option<String> {
        CivilDateTime::from_instant(instant)
            .map(|fields| format!("{}{}", fields.iso(), self.iso_offset))
    }
}

/// Renders a raw offset difference as `±HH:MM`. The stored difference
/// runs backwards from the conventional notation (a zone ahead of UTC
/// holds a negative number), so the sign is flipped here; the magnitudes
/// come from the duration decomposition of the absolute value.
fn iso_offset_string(offset_millis: i64) -> String {
    let sign = if offset_millis > 0 { '-' } else { '+' };
    let parts = Duration::of(offset_millis.abs()).decompose();
    format!("{}{:02}:{:02}", sign, parts.hours, parts.minutes)
}


/// Somewhere to keep resolved zone entries.
///
/// A cache only ever grows: entries are never evicted, and `set` keeps
/// whichever entry got there first, so every caller asking for the same
/// key sees the same allocation.
pub trait ZoneCache {

    /// Returns the entry cached under the key, if there is one.
    fn get(&self, key: &str) -> Option<Arc<ZoneEntry>>;

    /// Caches an entry under the key, unless one is already there.
    fn set(&self, key: &str, entry: Arc<ZoneEntry>);
}

/// The standard in-memory cache: a map behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Arc<ZoneEntry>>>,
}

impl ZoneCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Arc<ZoneEntry>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, entry: Arc<ZoneEntry>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = entries.entry(key.to_string()).or_insert(entry);
    }
}


/// Resolves timezone identifiers into shared [`ZoneEntry`] values,
/// remembering every result in its cache.
///
/// The free functions in this module go through a single process-wide
/// resolver; build your own — with [`MemoryCache`] or any other
/// [`ZoneCache`] — to control the cache’s lifetime, as tests tend to
/// want to.
#[derive(Debug, Default)]
pub struct ZoneResolver<C = MemoryCache> {
    cache: C,
}

impl ZoneResolver<MemoryCache> {

    /// Creates a resolver with an empty in-memory cache.
    pub fn new() -> Self {
        Self::with_cache(MemoryCache::default())
    }
}

impl<C: ZoneCache> ZoneResolver<C> {

    /// Creates a resolver that keeps its entries in the given cache.
    pub fn with_cache(cache: C) -> Self {
        Self { cache }
    }

    /// Resolves an identifier to its zone entry, computing and caching it
    /// on first sight. Repeated calls with the same identifier — however
    /// capitalized — return the identical cached allocation.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<ZoneEntry>, Error> {
        let canonical = identifier.to_lowercase();

        if let Some(entry) = self.cache.get(&canonical) {
            return Ok(entry);
        }

        let entry = Arc::new(ZoneEntry::resolve(identifier)?);
        log::debug!("caching zone entry for {:?} ({})", canonical, entry.iso_offset());
        self.cache.set(&canonical, entry.clone());

        // Re-read, so that if another thread got its entry in first,
        // everybody agrees on the one that won.
        Ok(self.cache.get(&canonical).unwrap_or(entry))
    }
}


static PROCESS_RESOLVER: Lazy<ZoneResolver> = Lazy::new(ZoneResolver::new);

/// Resolves the identifier through the process-wide resolver.
///
/// ```
/// use datespan::zone;
///
/// let chicago = zone::resolve("America/Chicago").unwrap();
/// assert_eq!(chicago.offset_millis(), 21_600_000);
/// assert_eq!(chicago.iso_offset(), "-06:00");
/// ```
pub fn resolve(identifier: &str) -> Result<Arc<ZoneEntry>, Error> {
    PROCESS_RESOLVER.resolve(identifier)
}

/// Resolves the timezone this machine appears to be configured in, if
/// one can be detected at all.
pub fn system() -> Option<Arc<ZoneEntry>> {
    let name = crate::system::sys_timezone()?;
    resolve(&name).ok()
}


#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Error {

    /// The identifier isn’t a timezone the zone database knows about.
    UnrecognizedZone(String),

    /// An invalid instant was passed where only a valid one can be
    /// rendered.
    InvalidInstant,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UnrecognizedZone(ref name) => write!(f, "Unrecognized timezone: {}", name),
            Self::InvalidInstant             => write!(f, "not a valid instant"),
        }
    }
}

impl ErrorTrait for Error {
}


#[cfg(test)]
mod test {
    use super::*;

    mod resolving {
        use super::*;

        #[test]
        fn behind_utc() {
            let chicago = resolve("America/Chicago").unwrap();
            assert_eq!(chicago.offset_millis(), 21_600_000);
            assert_eq!(chicago.iso_offset(), "-06:00");
            assert_eq!(chicago.identifier(), "america/chicago");
        }

        #[test]
        fn ahead_of_utc() {
            let berlin = resolve("Europe/Berlin").unwrap();
            assert_eq!(berlin.offset_millis(), -3_600_000);
            assert_eq!(berlin.iso_offset(), "+01:00");
        }

        #[test]
        fn utc_itself() {
            let utc = resolve("UTC").unwrap();
            assert_eq!(utc.offset_millis(), 0);
            assert_eq!(utc.iso_offset(), "+00:00");
        }

        #[test]
        fn not_whole_hours() {
            let kathmandu = resolve("Asia/Kathmandu").unwrap();
            assert_eq!(kathmandu.offset_millis(), -(5 * 3_600_000 + 45 * 60_000));
            assert_eq!(kathmandu.iso_offset(), "+05:45");
        }

        #[test]
        fn no_such_zone() {
            let error = resolve("Neverwhere/London-Below").unwrap_err();
            assert_eq!(error, Error::UnrecognizedZone("Neverwhere/London-Below".to_string()));
            assert_eq!(error.to_string(), "Unrecognized timezone: Neverwhere/London-Below");
        }
    }

    mod caching {
        use super::*;

        #[test]
        fn same_entry_every_time() {
            let first = resolve("America/Chicago").unwrap();
            let again = resolve("America/Chicago").unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }

        #[test]
        fn case_does_not_split_the_cache() {
            let resolver = ZoneResolver::new();
            let lower = resolver.resolve("america/chicago").unwrap();
            let shouty = resolver.resolve("AMERICA/CHICAGO").unwrap();
            assert!(Arc::ptr_eq(&lower, &shouty));
        }

        #[test]
        fn resolvers_do_not_share() {
            let ours = ZoneResolver::new().resolve("Europe/Berlin").unwrap();
            let theirs = ZoneResolver::new().resolve("Europe/Berlin").unwrap();
            assert_eq!(ours, theirs);
            assert!(!Arc::ptr_eq(&ours, &theirs));
        }

        #[test]
        fn set_keeps_the_first_entry() {
            let cache = MemoryCache::default();
            let first = Arc::new(ZoneEntry::resolve("UTC").unwrap());
            let second = Arc::new(ZoneEntry::resolve("UTC").unwrap());

            cache.set("utc", first.clone());
            cache.set("utc", second);
            assert!(Arc::ptr_eq(&cache.get("utc").unwrap(), &first));
        }
    }

    mod rendering {
        use super::*;

        fn friday_afternoon() -> Instant {
            // 2024-12-27T13:30:00Z
            Instant::at(1_735_306_200_000)
        }

        #[test]
        fn local_iso() {
            let chicago = resolve("America/Chicago").unwrap();
            assert_eq!(chicago.local_iso(friday_afternoon()).unwrap(),
                       "2024-12-27T07:30:00.000-06:00");
        }

        #[test]
        fn local_iso_with_weekday() {
            let chicago = resolve("America/Chicago").unwrap();
            assert_eq!(chicago.local_iso_with_weekday(friday_afternoon()).unwrap(),
                       "2024-12-27T07:30:00.000-06:00 - Fri");
        }

        #[test]
        fn weekday_changes_across_zones() {
            // 2025-01-01T03:00:00Z is still New Year’s Eve in Chicago.
            let instant = Instant::at(REFERENCE_MILLIS + 3 * 3_600_000);
            assert_eq!(resolve("America/Chicago").unwrap().weekday(instant), Some("Tue"));
            assert_eq!(resolve("UTC").unwrap().weekday(instant), Some("Wed"));
        }

        #[test]
        fn epoch_shifted_keeps_raw_fields() {
            let chicago = resolve("America/Chicago").unwrap();
            assert_eq!(chicago.epoch_shifted_iso(friday_afternoon()).unwrap(),
                       "2024-12-27T13:30:00.000-06:00");
        }

        #[test]
        fn nothing_renders_as_nothing() {
            let chicago = resolve("America/Chicago").unwrap();
            assert_eq!(chicago.local_iso(Instant::invalid()), None);
            assert_eq!(chicago.weekday(Instant::invalid()), None);
        }
    }
}
