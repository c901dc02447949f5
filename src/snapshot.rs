//! Shared multi-writer snapshot objects.

pub mod mutex;
pub mod retry;
pub mod versioned;

use crate::error::Result;

/// An index into the locations of a snapshot object.
pub type Location = usize;

/// A snapshot object with a fixed number of locations.
///
/// Any thread may update any location, and any thread may take a snapshot
/// of every location at once.
pub trait Snapshot {
    type Value: Clone;

    /// Creates a snapshot object with `len` locations, each set to the
    /// default value.
    fn new(len: usize) -> Self;

    /// Returns the number of locations in the object.
    fn len(&self) -> usize;

    /// Returns whether the object has no locations.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets the contents of `location` to the specified value.
    ///
    /// Returns [`Error::OutOfRange`](crate::Error::OutOfRange) if `location`
    /// is not less than [`len`](Snapshot::len).
    fn update(&self, location: Location, value: Self::Value) -> Result<()>;

    /// Returns the value of every location, in location order.
    fn snapshot(&self) -> Result<Vec<Self::Value>>;
}
