use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::thread;

use tracing::{debug, trace};

use crate::aggregator::Aggregator;
use crate::error::ReduceError;
use crate::grid::Grid;
use crate::implementations::join_workers;
use crate::lock_util::{into_inner, lock};
use crate::partition::{Cursor, SlicePlan};
use crate::worker::Scanner;

/*
  Bag of tasks: workers pull fixed-size row slices from a shared cursor

  The cursor and the accumulator live behind the same single Mutex.
  claim (read + advance the cursor) and merge are the serial parts; the
  scan of a claimed slice runs unlocked. Workers that finish early simply
  claim more, so uneven rows balance out on their own.
*/

/// Everything the workers share, guarded as one unit.
#[derive(Debug, Default)]
struct Bag {
    cursor: Cursor,
    aggregator: Aggregator,
}

pub fn dynamic_bag_reduce(
    grid: &Grid,
    workers: NonZeroUsize,
    plan: &SlicePlan,
    scan: &Scanner,
) -> Result<Aggregator, ReduceError> {
    let bag = Mutex::new(Bag::default());

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers.get())
            .map(|id| {
                let bag = &bag;
                scope.spawn(move || {
                    let mut claimed = 0usize;
                    loop {
                        let slice = lock(bag).cursor.claim(plan);
                        let Some(slice) = slice else { break };
                        trace!(worker = id, first = slice.start, end = slice.end, "claimed slice");
                        claimed += 1;

                        if let Some(partial) = scan(grid, slice) {
                            lock(bag).aggregator.merge(partial);
                        }
                    }
                    debug!(worker = id, slices = claimed, "bag worker finished");
                    claimed
                })
            })
            .collect();

        join_workers(handles)
    })?;

    Ok(into_inner(bag).aggregator)
}
