//! A multi-writer snapshot object built from versioned cells.
//!
//! Every location of a [`VersionedArray`] is a [`Cell`] holding a value and a
//! version that counts the updates made to that location. A snapshot reads
//! all cells once, then reads their versions a second time. If no version has
//! moved past the largest one seen in the first pass, the first pass is
//! returned. Otherwise the snapshot starts over.
//!
//! # Progress
//!
//! Updates always finish in a constant number of steps. Snapshots do not: a
//! writer that keeps updating can invalidate every attempt. The number of
//! attempts is therefore limited by a [`RetryPolicy`], and a snapshot that
//! runs out of attempts returns [`Error::SnapshotUnstable`].
//!
//! The wait-free construction of Afek, Attiya, Dolev, Gafni, Merritt and
//! Shavit [[AAD+93]](https://dl.acm.org/doi/10.1145/153724.153741) avoids
//! this by having writers embed a snapshot of their own in every update.
//! That construction is not used here.
//!
//! # Consistency
//!
//! The verify pass compares every cell against the largest version from the
//! first pass, not against that cell's own earlier version. An update that
//! leaves a cell's version at or below that maximum is not detected, so the
//! values returned are only guaranteed to be consistent with each other when
//! such updates cannot happen, for example when the object has a single
//! location.
//!
//! Versions wrap around to `0` after `u32::MAX`. Once any cell has reached
//! version `u32::MAX`, every version is at or below the maximum, and the
//! verify pass no longer detects any concurrent update.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use mrmw_snapshot::snapshot::Snapshot;
//! use mrmw_snapshot::snapshot::versioned::VersionedAtomicArray;
//!
//! const LEN: usize = 4;
//!
//! let array: Arc<VersionedAtomicArray> = Arc::new(VersionedAtomicArray::new(LEN));
//!
//! let mut handles = Vec::new();
//! for i in 0..LEN {
//!     let array = array.clone();
//!     handles.push(thread::spawn(move || {
//!         // Every writer touches every location.
//!         for location in 0..LEN {
//!             array.update(location, i as i32).unwrap();
//!         }
//!     }));
//! }
//!
//! let view = array.snapshot().unwrap();
//! assert_eq!(view.len(), LEN);
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```
use std::hint;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::register::{AtomicRegister, MutexRegister, Register};
use crate::snapshot::retry::RetryPolicy;
use crate::snapshot::{Location, Snapshot};

/// A lock-free snapshot object whose cells are stored in [`AtomicRegister`]s.
pub type VersionedAtomicArray = VersionedArray<AtomicRegister<Cell>>;

/// A snapshot object whose cells are stored in [`MutexRegister`]s.
///
/// Runs the same algorithm as [`VersionedAtomicArray`], but every cell
/// access takes a lock.
pub type VersionedMutexArray = VersionedArray<MutexRegister<Cell>>;

/// The contents of one location: a value, and the number of updates that
/// have been made to the location.
///
/// A cell converts to and from a single `u64`. The bits of the value occupy
/// the low 32 bits and the version occupies the high 32 bits, so a cell can
/// be stored in one [`AtomicRegister`] and never be observed torn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    value: i32,
    version: u32,
}

impl Cell {
    /// Returns the value stored in the cell.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Returns the number of updates made to the cell.
    ///
    /// Versions are `u32`s and wrap around to `0` after `u32::MAX` updates
    /// to the same location, after which a location's version goes down.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the cell that replaces this one when `value` is written.
    fn succeeded_by(&self, value: i32) -> Self {
        Self {
            value,
            version: self.version.wrapping_add(1),
        }
    }
}

impl From<u64> for Cell {
    fn from(encoding: u64) -> Self {
        Self {
            value: encoding as u32 as i32,
            version: (encoding >> 32) as u32,
        }
    }
}

impl From<Cell> for u64 {
    fn from(cell: Cell) -> Self {
        ((cell.version as u64) << 32) | (cell.value as u32 as u64)
    }
}

/// A multi-writer multi-reader snapshot object of `i32` values, backed by
/// register objects of type `R`.
///
/// The number of locations is fixed when the object is created. The cells
/// belong to the object, and threads share it by reference, usually through
/// an [`Arc`](std::sync::Arc).
pub struct VersionedArray<R: Register<Value = Cell>> {
    registers: Box<[R]>,
    policy: RetryPolicy,
}

impl<R: Register<Value = Cell>> VersionedArray<R> {
    /// Creates an object with `len` locations whose snapshots follow `policy`.
    ///
    /// ```
    /// use mrmw_snapshot::snapshot::Snapshot;
    /// use mrmw_snapshot::snapshot::retry::RetryPolicy;
    /// use mrmw_snapshot::snapshot::versioned::VersionedAtomicArray;
    ///
    /// let array = VersionedAtomicArray::with_policy(2, RetryPolicy::unbounded());
    /// assert_eq!(array.policy(), RetryPolicy::unbounded());
    /// assert_eq!(array.snapshot().unwrap(), vec![0, 0]);
    /// ```
    pub fn with_policy(len: usize, policy: RetryPolicy) -> Self {
        debug!(len, ?policy, "creating versioned array");
        Self {
            registers: (0..len).map(|_| R::new()).collect(),
            policy,
        }
    }

    /// Returns the retry policy used by snapshots of this object.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Returns the cell at every location, in location order.
    ///
    /// This is the same operation as [`Snapshot::snapshot`], except that the
    /// version of each cell is returned along with its value.
    ///
    /// ```
    /// use mrmw_snapshot::snapshot::Snapshot;
    /// use mrmw_snapshot::snapshot::versioned::VersionedAtomicArray;
    ///
    /// let array = VersionedAtomicArray::new(2);
    /// array.update(0, 5).unwrap();
    /// array.update(0, 6).unwrap();
    ///
    /// let cells = array.versioned_snapshot().unwrap();
    /// assert_eq!((cells[0].value(), cells[0].version()), (6, 2));
    /// assert_eq!((cells[1].value(), cells[1].version()), (0, 0));
    /// ```
    pub fn versioned_snapshot(&self) -> Result<Vec<Cell>> {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            let (cells, max_version) = self.collect();
            match self.verify(max_version) {
                None => return Ok(cells),
                Some(location) => {
                    if !self.policy.allows_retry(attempts) {
                        warn!(attempts, "snapshot retry policy exhausted");
                        return Err(Error::SnapshotUnstable { attempts });
                    }
                    trace!(
                        attempts,
                        location,
                        max_version,
                        "concurrent update invalidated snapshot, retrying"
                    );
                    hint::spin_loop();
                }
            }
        }
    }

    /// Reads every cell once, returning the cells read and the largest
    /// version among them.
    fn collect(&self) -> (Vec<Cell>, u32) {
        let cells: Vec<Cell> = self.registers.iter().map(|r| r.read()).collect();
        let max_version = cells.iter().map(Cell::version).max().unwrap_or(0);
        (cells, max_version)
    }

    /// Re-reads every cell and returns the first location whose version is
    /// now greater than `max_version`, if any.
    fn verify(&self, max_version: u32) -> Option<Location> {
        self.registers
            .iter()
            .position(|r| r.read().version() > max_version)
    }
}

impl<R: Register<Value = Cell>> Snapshot for VersionedArray<R> {
    type Value = i32;

    /// Creates an object with `len` locations and the default
    /// [`RetryPolicy`].
    fn new(len: usize) -> Self {
        Self::with_policy(len, RetryPolicy::default())
    }

    fn len(&self) -> usize {
        self.registers.len()
    }

    /// Writes `value` to `location` and increments its version.
    ///
    /// The cell is read and then overwritten, without retrying. If two
    /// threads update the same location at once, both may write the same
    /// version, and whichever write lands last is kept.
    fn update(&self, location: Location, value: Self::Value) -> Result<()> {
        let register = self.registers.get(location).ok_or_else(|| {
            debug!(location, len = self.len(), "rejected out-of-range update");
            Error::OutOfRange {
                location,
                len: self.len(),
            }
        })?;
        register.write(register.read().succeeded_by(value));
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Self::Value>> {
        Ok(self
            .versioned_snapshot()?
            .into_iter()
            .map(|cell| cell.value())
            .collect())
    }
}
