use std::marker::{Send, Sync};
use std::sync::{Arc, Mutex};

use mrmw_snapshot::snapshot::Snapshot;
use mrmw_utils::specifications::snapshot::{SnapshotOperation, SnapshotSpecification};
use mrmw_utils::{Action, History, WGLChecker};
use shuttle::rand::{rngs::ThreadRng, thread_rng, Rng};
use shuttle::thread;

pub const NUM_ITERATIONS: usize = 250;
pub const NUM_OPERATIONS: usize = 30;
pub const NUM_PREEMPTIONS: usize = 3;
pub const NUM_THREADS: usize = 4;

/// The largest value written by random updates.
const MAX_VALUE: i32 = 100;

type ProcessAction = (usize, Action<SnapshotOperation<i32>>);

/// Asserts that the sequence of actions corresponds to a linearizable
/// history of operations on a snapshot object with `len` locations.
///
/// # Panics
///
/// Panics if the history of actions is not linearizable.
pub fn assert_linearizable(len: usize, actions: Vec<ProcessAction>) {
    let checker = WGLChecker::new(SnapshotSpecification::new(len));
    assert!(checker.is_linearizable(History::from_actions(actions)));
}

/// A snapshot object that records every call and response made to it.
///
/// Calls are recorded before an operation starts, and responses after it
/// finishes, so the order of the recording is consistent with real time.
pub struct RecordingSnapshot<S: Snapshot<Value = i32>> {
    actions: Mutex<Vec<ProcessAction>>,
    snapshot: S,
}

impl<S: Snapshot<Value = i32>> RecordingSnapshot<S> {
    pub fn new(len: usize) -> Self {
        Self {
            actions: Mutex::new(vec![]),
            snapshot: S::new(len),
        }
    }

    pub fn actions(&self) -> Vec<ProcessAction> {
        self.actions.lock().unwrap().clone()
    }

    pub fn perform_random_operation(&self, process: usize, p: f64, rng: &mut ThreadRng) {
        if rng.gen_bool(p) {
            let location = rng.gen_range(0..self.snapshot.len());
            let value = rng.gen_range(0..=MAX_VALUE);
            self.update(process, location, value);
        } else {
            self.snapshot(process);
        }
    }

    fn record(&self, process: usize, action: Action<SnapshotOperation<i32>>) {
        self.actions.lock().unwrap().push((process, action));
    }

    pub fn snapshot(&self, process: usize) {
        self.record(process, Action::Call(SnapshotOperation::Snapshot(None)));

        let view = self.snapshot.snapshot().unwrap();

        let response = Action::Response(SnapshotOperation::Snapshot(Some(view)));
        self.record(process, response);
    }

    pub fn update(&self, process: usize, location: usize, value: i32) {
        let operation = SnapshotOperation::Update(location, value);
        self.record(process, Action::Call(operation.clone()));

        self.snapshot.update(location, value).unwrap();

        self.record(process, Action::Response(operation));
    }
}

/// Assert that a history in which `NUM_THREADS` threads perform random
/// updates and snapshots on an object with `len` locations is linearizable.
///
/// Must be run inside of a `shuttle` test.
///
/// # Panics
///
/// Panics if the history of random operations is not linearizable.
pub fn assert_random_operations_are_linearizable<S>(len: usize)
where
    S: Snapshot<Value = i32> + 'static + Send + Sync,
{
    const UPDATE_PROBABILITY: f64 = 1.0 / 2.0;

    let mut handles = Vec::new();
    let snapshot: Arc<RecordingSnapshot<S>> = Arc::new(RecordingSnapshot::new(len));

    for process in 0..NUM_THREADS {
        let snapshot = snapshot.clone();
        handles.push(thread::spawn(move || {
            let mut rng = thread_rng();
            for _ in 0..NUM_OPERATIONS {
                snapshot.perform_random_operation(process, UPDATE_PROBABILITY, &mut rng);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_linearizable(len, snapshot.actions());
}
