//! A multi-reader multi-writer snapshot object.
//!
//! The central type is [`VersionedArray`](snapshot::versioned::VersionedArray),
//! an array of integer locations that any number of threads can update while
//! others take consistent snapshots of every location at once.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use mrmw_snapshot::snapshot::Snapshot;
//! use mrmw_snapshot::snapshot::versioned::VersionedAtomicArray;
//!
//! let array: Arc<VersionedAtomicArray> = Arc::new(VersionedAtomicArray::new(3));
//!
//! let writer = {
//!     let array = array.clone();
//!     thread::spawn(move || array.update(1, 42))
//! };
//! writer.join().unwrap().unwrap();
//!
//! assert_eq!(array.snapshot().unwrap(), vec![0, 42, 0]);
//! ```
pub mod error;
pub mod register;
pub mod snapshot;
pub(crate) mod sync;

pub use error::{Error, Result};
