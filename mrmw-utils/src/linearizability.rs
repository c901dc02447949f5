//! Checking [linearizability](https://en.wikipedia.org/wiki/Linearizability) of a
//! history of operations applied to a shared object.
use std::collections::HashSet;

use crate::linearizability::history::{Entry, History};
use crate::specifications::Specification;

pub mod history;

/// A linearizability checker.
///
/// An implementation of the algorithm of Jeannette Wing and Chun Gong
/// [\[WG93\]](https://www.cs.cmu.edu/~wing/publications/WingGong93.pdf), as
/// extended by Gavin Lowe [\[L17\]](http://www.cs.ox.ac.uk/people/gavin.lowe/LinearizabiltyTesting/).
///
/// The checker linearizes each operation as early as it can. When an
/// operation cannot be linearized, it backtracks and tries the next one.
/// Every partial linearization that has been tried is cached along with the
/// state it produced, so that no search is repeated.
///
/// # Examples
///
/// ```
/// use mrmw_utils::specifications::snapshot::{SnapshotOperation, SnapshotSpecification};
/// use mrmw_utils::{Action::{Call, Response}, History, WGLChecker};
///
/// use SnapshotOperation::{Snapshot, Update};
///
/// let checker = WGLChecker::new(SnapshotSpecification::<i32>::new(2));
///
/// // A snapshot that overlaps an update may or may not see it.
/// // P0 |--------|         Update(1, 5)
/// // P1    |--|            Snapshot([0, 0])
/// // P2          |------|  Snapshot([0, 5])
/// let history = History::from_actions(vec![
///     (0, Call(Update(1, 5))),
///     (1, Call(Snapshot(None))),
///     (1, Response(Snapshot(Some(vec![0, 0])))),
///     (0, Response(Update(1, 5))),
///     (2, Call(Snapshot(None))),
///     (2, Response(Snapshot(Some(vec![0, 5])))),
/// ]);
/// assert!(checker.is_linearizable(history));
///
/// // But once the update has finished, every later snapshot must see it.
/// // P0 |--|               Update(1, 5)
/// // P1       |--|         Snapshot([0, 0])
/// let history = History::from_actions(vec![
///     (0, Call(Update(1, 5))),
///     (0, Response(Update(1, 5))),
///     (1, Call(Snapshot(None))),
///     (1, Response(Snapshot(Some(vec![0, 0])))),
/// ]);
/// assert!(!checker.is_linearizable(history));
/// ```
pub struct WGLChecker<S: Specification> {
    specification: S,
}

type OperationEntry<S> = Entry<<S as Specification>::Operation>;
type OperationCall<S> = (
    (OperationEntry<S>, OperationEntry<S>),
    <S as Specification>::State,
);

impl<S: Specification> WGLChecker<S> {
    pub fn new(specification: S) -> Self {
        Self { specification }
    }

    /// Returns whether the history of operations is linearizable with respect to the specification.
    pub fn is_linearizable(&self, mut history: History<S::Operation>) -> bool {
        let mut state = self.specification.init();
        let mut linearized = vec![false; history.len()];
        let mut calls: Vec<OperationCall<S>> = Vec::new();
        let mut cache: HashSet<(Vec<bool>, S::State)> = HashSet::new();
        let mut curr = 0;
        loop {
            if history.is_empty() {
                return true;
            }
            match &history[curr] {
                Entry::Call(call) => {
                    let call_id = call.id;
                    let (is_valid, new_state) = match &history[history.index_of_id(call.response)]
                    {
                        Entry::Call(_) => panic!("Response cannot be a call entry"),
                        Entry::Response(response) => {
                            self.specification.apply(&response.operation, &state)
                        }
                    };
                    let mut changed = false;
                    if is_valid {
                        let mut tmp_linearized = linearized.clone();
                        tmp_linearized[call_id] = true;
                        changed = cache.insert((tmp_linearized, new_state.clone()));
                    }
                    if changed {
                        linearized[call_id] = true;
                        let lifted = history.lift(curr);
                        calls.push((lifted, state));
                        state = new_state;
                        curr = 0;
                    } else {
                        curr += 1;
                    }
                }
                Entry::Response(_) => match calls.pop() {
                    None => return false,
                    Some(((call, response), old_state)) => {
                        state = old_state;
                        linearized[call.id()] = false;
                        let (call_index, _) = history.unlift(call, response);
                        curr = call_index + 1;
                    }
                },
            }
        }
    }
}
