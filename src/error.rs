//! Errors returned by snapshot objects.
use thiserror::Error;

/// An error from an operation on a snapshot object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An update named a location outside of the object.
    #[error("location {location} is out of range for a snapshot object of length {len}")]
    OutOfRange { location: usize, len: usize },

    /// Concurrent updates kept invalidating a snapshot until its retry
    /// policy ran out of attempts.
    #[error("snapshot did not stabilize after {attempts} attempts")]
    SnapshotUnstable { attempts: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
