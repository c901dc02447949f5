#[cfg(feature = "shuttle")]
mod linearizability {
    use super::super::common::{
        assert_random_operations_are_linearizable, NUM_ITERATIONS, NUM_PREEMPTIONS,
    };
    use mrmw_snapshot::snapshot::versioned::{VersionedAtomicArray, VersionedMutexArray};

    // With a single location, any number of writers and readers must agree
    // with some sequential order of their operations.
    #[test]
    fn atomic_array_with_one_location_is_linearizable() {
        shuttle::check_pct(
            || assert_random_operations_are_linearizable::<VersionedAtomicArray>(1),
            NUM_ITERATIONS,
            NUM_PREEMPTIONS,
        );
    }

    #[test]
    fn mutex_array_with_one_location_is_linearizable() {
        shuttle::check_pct(
            || assert_random_operations_are_linearizable::<VersionedMutexArray>(1),
            NUM_ITERATIONS,
            NUM_PREEMPTIONS,
        );
    }
}

#[cfg(not(feature = "shuttle"))]
mod threads {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use mrmw_snapshot::snapshot::retry::RetryPolicy;
    use mrmw_snapshot::snapshot::versioned::VersionedAtomicArray;
    use mrmw_snapshot::snapshot::Snapshot;

    const NUM_SNAPSHOTS: usize = 2_000;
    const NUM_WRITERS: usize = 4;
    const WRITES_PER_WRITER: i32 = 5_000;

    fn unbounded(len: usize) -> Arc<VersionedAtomicArray> {
        Arc::new(VersionedAtomicArray::with_policy(
            len,
            RetryPolicy::unbounded(),
        ))
    }

    #[test]
    fn sees_update_after_join() {
        let array: Arc<VersionedAtomicArray> = Arc::new(VersionedAtomicArray::new(3));
        let writer = {
            let array = array.clone();
            thread::spawn(move || array.update(1, 42))
        };
        writer.join().unwrap().unwrap();
        assert_eq!(array.snapshot().unwrap(), vec![0, 42, 0]);
    }

    #[test]
    fn keeps_last_update_of_each_location() {
        let array = VersionedAtomicArray::new(5);
        for round in 0..10 {
            for location in (0..4).rev() {
                array.update(location, round * 10 + location as i32).unwrap();
            }
        }
        assert_eq!(array.snapshot().unwrap(), vec![90, 91, 92, 93, 0]);
    }

    #[test]
    fn snapshots_without_writes_are_identical() {
        let array = VersionedAtomicArray::new(3);
        array.update(0, -7).unwrap();
        array.update(2, 7).unwrap();
        let first = array.versioned_snapshot().unwrap();
        let second = array.versioned_snapshot().unwrap();
        assert_eq!(first, second);
    }

    // One writer counts upwards in the only location while another thread
    // takes snapshots. Every value seen must have been written, and the
    // values seen must never go backwards.
    #[test]
    fn single_location_values_never_go_backwards() {
        let array = unbounded(1);

        let writer = {
            let array = array.clone();
            thread::spawn(move || {
                for value in 1..=WRITES_PER_WRITER {
                    array.update(0, value).unwrap();
                }
            })
        };

        let mut last = 0;
        for _ in 0..NUM_SNAPSHOTS {
            let view = array.snapshot().unwrap();
            assert_eq!(view.len(), 1);
            assert!(view[0] >= last, "saw {} after {}", view[0], last);
            assert!(view[0] <= WRITES_PER_WRITER);
            last = view[0];
        }

        writer.join().unwrap();
        assert_eq!(array.snapshot().unwrap(), vec![WRITES_PER_WRITER]);
    }

    // Several writers race on the same location. A snapshot may return any
    // of their values, but never one that no writer wrote.
    #[test]
    fn racing_writers_never_produce_fabricated_values() {
        let array = unbounded(1);
        let written: HashSet<i32> = (0..NUM_WRITERS as i32)
            .flat_map(|w| (1..=WRITES_PER_WRITER).map(move |k| w * WRITES_PER_WRITER + k))
            .collect();

        let writers: Vec<_> = (0..NUM_WRITERS as i32)
            .map(|w| {
                let array = array.clone();
                thread::spawn(move || {
                    for k in 1..=WRITES_PER_WRITER {
                        array.update(0, w * WRITES_PER_WRITER + k).unwrap();
                    }
                })
            })
            .collect();

        for _ in 0..NUM_SNAPSHOTS {
            let value = array.snapshot().unwrap()[0];
            assert!(value == 0 || written.contains(&value), "fabricated {value}");
        }

        for writer in writers {
            writer.join().unwrap();
        }
        assert!(written.contains(&array.snapshot().unwrap()[0]));
    }

    // Each location has its own writer, which counts upwards. Versions and
    // values of every location must be non-decreasing from one snapshot to
    // the next, and each value must match the number of updates made to it.
    #[test]
    fn versions_never_go_backwards_with_one_writer_per_location() {
        let array = unbounded(NUM_WRITERS);

        let writers: Vec<_> = (0..NUM_WRITERS)
            .map(|location| {
                let array = array.clone();
                thread::spawn(move || {
                    for value in 1..=WRITES_PER_WRITER {
                        array.update(location, value).unwrap();
                    }
                })
            })
            .collect();

        let mut last = vec![0; NUM_WRITERS];
        for _ in 0..NUM_SNAPSHOTS {
            let cells = array.versioned_snapshot().unwrap();
            for (location, cell) in cells.iter().enumerate() {
                assert!(cell.version() >= last[location]);
                assert_eq!(cell.value() as u32, cell.version());
                last[location] = cell.version();
            }
        }

        for writer in writers {
            writer.join().unwrap();
        }
        let expected = vec![WRITES_PER_WRITER; NUM_WRITERS];
        assert_eq!(array.snapshot().unwrap(), expected);
    }
}
