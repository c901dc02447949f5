use std::sync::PoisonError;

use crate::sync::Mutex;

use super::Register;

/// A register backed by a [`Mutex`].
///
/// Any `Copy` type can be stored, regardless of size. Every access takes the
/// lock, so this register is linearizable but **not** lock-free.
///
/// # Examples
///
/// ```
/// use mrmw_snapshot::register::{MutexRegister, Register};
///
/// let register: MutexRegister<[i64; 16]> = MutexRegister::new();
/// assert_eq!(register.read(), [0; 16]);
///
/// register.write([7; 16]);
/// assert_eq!(register.read(), [7; 16]);
/// ```
#[derive(Debug)]
pub struct MutexRegister<T: Copy + Default> {
    mutex: Mutex<T>,
}

impl<T: Copy + Default> Default for MutexRegister<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> Register for MutexRegister<T> {
    type Value = T;

    fn new() -> Self {
        Self {
            mutex: Mutex::new(T::default()),
        }
    }

    fn read(&self) -> Self::Value {
        // Contents are plain `Copy` data, so a poisoned lock still holds a
        // whole value.
        *self.mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, value: Self::Value) {
        *self.mutex.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}
