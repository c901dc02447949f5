//! A sequential specification of a multi-writer snapshot object.
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::specifications::Specification;

use SnapshotOperation::{Snapshot, Update};

/// An index into the locations of a snapshot object.
pub type Location = usize;

/// An operation on a snapshot object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOperation<T> {
    /// Take a snapshot, returning the value of every location.
    ///
    /// If the return value is not-yet-known, this can be represented as
    /// `Snapshot(None)`.
    Snapshot(Option<Vec<T>>),
    /// Write a value to a location. Any process may write any location.
    Update(Location, T),
}

/// A specification of a snapshot object with `len` locations, each containing
/// a value of type `T`.
pub struct SnapshotSpecification<T: Clone + Debug + Default + Eq + Hash> {
    len: usize,
    data_type: PhantomData<T>,
}

impl<T: Clone + Debug + Default + Eq + Hash> SnapshotSpecification<T> {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            data_type: PhantomData,
        }
    }
}

impl<T: Clone + Debug + Default + Eq + Hash> Specification for SnapshotSpecification<T> {
    type State = Vec<T>;
    type Operation = SnapshotOperation<T>;

    fn init(&self) -> Self::State {
        vec![T::default(); self.len]
    }

    fn apply(&self, operation: &Self::Operation, state: &Self::State) -> (bool, Self::State) {
        match operation {
            Snapshot(view) => {
                let view = view
                    .as_ref()
                    .expect("Cannot apply `Snapshot` with unknown return value");
                (view == state, state.clone())
            }
            Update(location, value) => match state.get(*location) {
                Some(_) => {
                    let mut new_state = state.clone();
                    new_state[*location] = value.clone();
                    (true, new_state)
                }
                None => (false, state.clone()),
            },
        }
    }
}
