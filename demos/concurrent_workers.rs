// Collecting failures from concurrent workers
//
// ErrorAggregate can be shared between threads and added to without any
// extra locking. Once the workers are done, err_or_nil() turns it into
// nothing, the single failure, or the whole aggregate.

use std::{thread, time::Duration};

use stackcause::{identity, prelude::*};

#[derive(Clone, Debug, thiserror::Error)]
#[error("shard {0} is unavailable")]
struct ShardUnavailable(u32);

fn sync_shard(shard: u32) -> Result<(), StackError> {
    thread::sleep(Duration::from_millis(u64::from(shard) * 5));
    if shard % 3 == 0 {
        return Err(StackError::wrap(ShardUnavailable(shard), "sync failed"));
    }
    Ok(())
}

fn sync_all(shards: u32) -> Result<(), SharedError> {
    let failures = ErrorAggregate::new();

    thread::scope(|scope| {
        for shard in 1..=shards {
            let failures = &failures;
            scope.spawn(move || {
                if let Err(error) = sync_shard(shard) {
                    failures.add(error);
                }
            });
        }
    });

    failures.into_result()
}

fn validate(names: &[&str]) -> Option<ErrorList> {
    let mut errors: Option<ErrorList> = None;
    for name in names {
        if name.is_empty() {
            errors.add(stack_error!("empty name"));
        } else if name.len() > 8 {
            errors.add(stack_error!("name {name:?} is too long"));
        }
    }
    errors
}

fn main() {
    println!("Example 1: Concurrent failures\n");
    match sync_all(7) {
        Ok(()) => println!("All shards synced"),
        Err(error) => {
            println!("{error}\n");
            println!("{error:#}\n");
            if let Some(shard) = error.extract::<ShardUnavailable>() {
                println!("First unavailable shard: {}\n", shard.0);
            }
        }
    }

    println!("Example 2: A single failure is returned as itself\n");
    match sync_all(4) {
        Ok(()) => println!("All shards synced"),
        Err(error) => println!(
            "Returned as a StackError: {}\n",
            error.downcast_ref::<StackError>().is_some()
        ),
    }

    println!("Example 3: Lazily created lists\n");
    let errors = validate(&["ok", "", "much_too_long"]);
    println!("{}", errors.error_text());
    println!(
        "contains a StackError: {}",
        errors
            .as_ref()
            .is_some_and(|list| identity::contains_type::<StackError>(list))
    );
    let nothing = validate(&["fine"]);
    println!("no errors: {}", nothing.err_or_nil().is_none());
}
