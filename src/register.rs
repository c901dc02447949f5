//! Shared read/write registers, the primitive that snapshot objects are built from.
//!
//! See [`AtomicRegister`] and [`MutexRegister`].
mod atomic;
pub use self::atomic::AtomicRegister;
mod mutex;
pub use self::mutex::MutexRegister;

/// A shared-memory register.
pub trait Register {
    type Value;

    /// Creates a new register containing the default value.
    fn new() -> Self;

    /// Returns the value currently contained in the register.
    fn read(&self) -> Self::Value;

    /// Sets contents of the register to the specified value.
    fn write(&self, value: Self::Value);
}
