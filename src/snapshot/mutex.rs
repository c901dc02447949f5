//! A snapshot object backed by a single [`Mutex`].
use std::sync::PoisonError;

use crate::error::{Error, Result};
use crate::snapshot::{Location, Snapshot};
use crate::sync::Mutex;

/// A [`Mutex`]-based snapshot object.
///
/// All locations live behind one lock, which every update and snapshot
/// takes. This is linearizable for any number of locations, but it is
/// **not** lock-free.
pub struct MutexSnapshot<T: Clone + Default> {
    mutex: Mutex<Vec<T>>,
}

impl<T: Clone + Default> Snapshot for MutexSnapshot<T> {
    type Value = T;

    fn new(len: usize) -> Self {
        Self {
            mutex: Mutex::new(vec![T::default(); len]),
        }
    }

    fn len(&self) -> usize {
        self.mutex
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn update(&self, location: Location, value: Self::Value) -> Result<()> {
        let mut data = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);
        let len = data.len();
        let slot = data
            .get_mut(location)
            .ok_or(Error::OutOfRange { location, len })?;
        *slot = value;
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Self::Value>> {
        Ok(self
            .mutex
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
