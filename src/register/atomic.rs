use std::marker::PhantomData;

use crate::sync::{AtomicU64, Ordering};

use super::Register;

/// A register backed by a single `AtomicU64`.
///
/// Values are converted to a `u64` on every write and back again on every
/// read, so anything stored here must fit in 64 bits. In exchange, a read
/// or write is one native atomic instruction: readers can never observe
/// half of one write and half of another.
///
/// This is what lets a [`Cell`](crate::snapshot::versioned::Cell) keep its
/// value and version together. Both fields are packed into the same word,
/// and so are always loaded and stored as a pair.
///
/// # Memory Ordering
///
/// All accesses use [`Ordering::SeqCst`]. Sequential consistency is the
/// strongest ordering Rust offers for atomics, but it is weaker than
/// linearizability: objects built from these registers are only guaranteed
/// to be sequentially consistent. For a register that is linearizable at the
/// cost of lock-freedom, see [`MutexRegister`](super::MutexRegister).
///
/// # Examples
///
/// Handing a flag from one thread to another.
///
/// ```
/// use std::sync::Arc;
/// use std::{hint, thread};
/// use mrmw_snapshot::register::{AtomicRegister, Register};
///
/// let register: Arc<AtomicRegister<u64>> = Arc::new(AtomicRegister::new());
///
/// let register_clone = register.clone();
/// let thread = thread::spawn(move || register_clone.write(1));
///
/// while register.read() == 0 {
///     hint::spin_loop();
/// }
///
/// thread.join().unwrap();
/// ```
pub struct AtomicRegister<T: Default + From<u64> + Into<u64>> {
    register: AtomicU64,
    _value_type: PhantomData<T>,
}

impl<T: Default + From<u64> + Into<u64>> Default for AtomicRegister<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + From<u64> + Into<u64>> Register for AtomicRegister<T> {
    type Value = T;

    /// Creates a new register containing the default value of `T`.
    ///
    /// ```
    /// use mrmw_snapshot::register::{AtomicRegister, Register};
    ///
    /// let register: AtomicRegister<u64> = AtomicRegister::new();
    /// assert_eq!(register.read(), 0);
    /// ```
    fn new() -> Self {
        Self {
            register: AtomicU64::new(T::default().into()),
            _value_type: PhantomData,
        }
    }

    fn read(&self) -> T {
        self.register.load(Ordering::SeqCst).into()
    }

    fn write(&self, value: T) {
        self.register.store(value.into(), Ordering::SeqCst)
    }
}
