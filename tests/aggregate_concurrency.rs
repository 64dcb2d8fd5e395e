use std::{sync::Barrier, thread};

use stackcause::{ErrorAggregate, SharedError, StackError, identity};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("worker {0} failed")]
struct TaggedError(usize);

const WORKERS: usize = 200;

#[test]
fn concurrent_adds_are_all_kept() {
    let aggregate = ErrorAggregate::new();

    thread::scope(|scope| {
        for worker in 1..=WORKERS {
            let aggregate = &aggregate;
            scope.spawn(move || aggregate.add(TaggedError(worker)));
        }
    });

    let errors = aggregate.errors();
    assert_eq!(errors.len(), WORKERS);

    let sum: usize = errors
        .iter()
        .map(|error| error.downcast_ref::<TaggedError>().map_or(0, |tagged| tagged.0))
        .sum();
    assert_eq!(sum, WORKERS * (WORKERS + 1) / 2);
}

#[test]
fn readers_run_alongside_writers() {
    let aggregate = ErrorAggregate::new();
    let barrier = Barrier::new(WORKERS + 4);

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let (aggregate, barrier) = (&aggregate, &barrier);
            scope.spawn(move || {
                barrier.wait();
                aggregate.add(StackError::wrap(TaggedError(worker), "job failed"));
            });
        }

        for _ in 0..4 {
            let (aggregate, barrier) = (&aggregate, &barrier);
            scope.spawn(move || {
                barrier.wait();
                let mut seen = 0;
                while seen < WORKERS {
                    let snapshot = aggregate.errors();
                    assert!(snapshot.len() >= seen);
                    seen = snapshot.len();

                    // Rendering works on a snapshot and never blocks writers.
                    let text = aggregate.to_string();
                    assert!(text.lines().count() >= seen);
                    thread::yield_now();
                }
            });
        }
    });

    assert_eq!(aggregate.len(), WORKERS);
    assert!(identity::contains_type::<TaggedError>(&aggregate));
}

#[test]
fn concurrent_add_once_keeps_a_single_copy() {
    let aggregate = ErrorAggregate::new();
    let shared = SharedError::from(TaggedError(7));

    let added: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let (aggregate, shared) = (&aggregate, shared.clone());
                scope.spawn(move || aggregate.add_once(shared))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| usize::from(handle.join().unwrap_or(false)))
            .sum()
    });

    assert_eq!(added, 1);
    assert_eq!(aggregate.len(), 1);
    assert!(aggregate.is(shared.as_dyn()));
}

#[test]
fn reset_while_adding_leaves_a_consistent_aggregate() {
    let aggregate = ErrorAggregate::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            for worker in 0..WORKERS {
                aggregate.add(TaggedError(worker));
            }
        });
        scope.spawn(|| {
            for _ in 0..16 {
                aggregate.reset();
                thread::yield_now();
            }
        });
    });

    let remaining = aggregate.errors();
    assert!(remaining.len() <= WORKERS);
    // Whatever survived the last reset is a suffix of the insertion order.
    let tags: Vec<usize> = remaining
        .iter()
        .filter_map(|error| error.extract::<TaggedError>())
        .map(|tagged| tagged.0)
        .collect();
    assert!(tags.windows(2).all(|pair| pair[0] + 1 == pair[1]));
    if let Some(&last) = tags.last() {
        assert_eq!(last, WORKERS - 1);
    }
}
