#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Library for [timezone-aware date arithmetic](https://crates.io/crates/datespan)
//! and date-range algebra.
//!
//! # Examples
//!
//! ```
//! use datespan::{parse, zone, DateRange, Delta};
//!
//! let opened = parse::parse("2024-12-27T13:30:00").unwrap();
//! let closed = opened.add(&Delta::new().days(3));
//!
//! let range = DateRange::new(opened, closed);
//! assert!(range.contains(opened.add(&Delta::new().hours(36))));
//!
//! let rendered = zone::to_local_iso(opened, "America/Chicago", false).unwrap();
//! assert_eq!(rendered, "2024-12-27T07:30:00.000-06:00");
//! ```

pub mod cal;
pub mod delta;
pub mod duration;
pub mod fmt;
pub mod instant;
pub mod iter;
pub mod parse;
pub mod range;
pub mod zone;
mod system;

pub use cal::{CivilDate, CivilDateTime, CivilTime, DatePiece, Month, TimePiece, Weekday, Year};
pub use delta::Delta;
pub use duration::{divide_remainder, Duration};
pub use fmt::Iso;
pub use instant::Instant;
pub use range::DateRange;
pub use zone::{ZoneEntry, ZoneResolver};
