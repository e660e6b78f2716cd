//! Iterators and sequence builders over stepped instants.

use std::error::Error as ErrorTrait;
use std::fmt;

use crate::delta::Delta;
use crate::instant::Instant;


/// Returns an endless iterator over the instants reached by repeatedly
/// applying `delta`, beginning with `start` itself. The iterator only
/// stops by itself if a step somehow produces an invalid instant.
pub fn steps(start: Instant, delta: Delta) -> Steps {
    Steps { next: start, delta }
}

/// An iterator over regularly-stepped instants.
///
/// Use the [`steps`] function to create instances of this iterator.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Steps {
    next: Instant,
    delta: Delta,
}

impl Iterator for Steps {
    type Item = Instant;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }

        let current = self.next;
        self.next = current.add(&self.delta);
        Some(current)
    }
}


/// Produces `count + 1` instants: `start`, followed by `count` successive
/// applications of `delta`.
pub fn arrange(start: Instant, count: usize, delta: &Delta) -> Result<Vec<Instant>, Error> {
    if !start.is_valid() {
        return Err(Error::InvalidStart);
    }

    Ok(steps(start, *delta).take(count + 1).collect())
}

/// Produces the instants reached from `start` by repeatedly applying
/// `delta`, keeping those strictly before `end`, with `end` itself always
/// appended last — so the final pair may sit closer together than one
/// step. A delta that fails to move the cursor forwards ends generation
/// rather than spinning in place.
pub fn sequence(start: Instant, end: Instant, delta: &Delta) -> Result<Vec<Instant>, Error> {
    if !start.is_valid() {
        return Err(Error::InvalidStart);
    }

    if !end.is_valid() {
        return Err(Error::InvalidEnd);
    }

    let mut dates = Vec::new();
    let mut current = start;

    while current < end {
        dates.push(current);

        let next = current.add(delta);
        if !next.is_valid() || next <= current {
            break;
        }

        current = next;
    }

    dates.push(end);
    Ok(dates)
}


#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Error {

    /// The starting instant of a sequence was invalid.
    InvalidStart,

    /// The ending instant of a sequence was invalid.
    InvalidEnd,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidStart => write!(f, "sequence start is not a valid instant"),
            Self::InvalidEnd   => write!(f, "sequence end is not a valid instant"),
        }
    }
}

impl ErrorTrait for Error {
}
