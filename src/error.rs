use std::{error, fmt};

use crate::index::MIN_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The requested capacity is not a power of two of at least 4.
    InvalidCapacity(usize),
    /// The seed offset does not address a slot of the backing array.
    FrontOutOfRange { front: usize, capacity: usize },
    /// The seed data would leave no free slot in the backing array.
    SeedOverflow { len: usize, capacity: usize },
    /// The lookback window must span at least one day.
    InvalidWindow(usize),
    /// A running profit total no longer fits the numeric type.
    Overflow { day: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => write!(
                f,
                "capacity {} is not a power of two of at least {}",
                capacity, MIN_CAPACITY
            ),
            Error::FrontOutOfRange { front, capacity } => write!(
                f,
                "front offset {} is out of range for capacity {}",
                front, capacity
            ),
            Error::SeedOverflow { len, capacity } => write!(
                f,
                "seed of {} elements does not fit below capacity {}",
                len, capacity
            ),
            Error::InvalidWindow(k) => {
                write!(f, "lookback window must be at least 1 day, got {}", k)
            }
            Error::Overflow { day } => write!(f, "profit total overflowed on day {}", day),
        }
    }
}

impl error::Error for Error {}
