//! Rendering dates, times, and instants as strings.

mod custom;
mod iso;

pub use self::custom::{DateFormat, Field, FormatError, Style};
pub use self::iso::{utc_iso, Iso};
