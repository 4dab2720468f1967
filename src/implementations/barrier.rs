use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::thread;

use tracing::debug;

use crate::aggregator::Aggregator;
use crate::counting_barrier::CountingBarrier;
use crate::error::ReduceError;
use crate::grid::Grid;
use crate::implementations::join_workers;
use crate::partition::StripPlan;
use crate::result::PartialResult;
use crate::worker::Scanner;

/*
  Static strips + counting barrier + single merge by worker 0

  1. every worker scans its own strip with no shared state touched
  2. the partial goes into the slot indexed by the worker id
  3. everyone meets at the barrier
  4. worker 0 alone folds the slots in worker order; the rest just exit

  The scan phase has no lock contention at all, at the price of no merge
  work starting before the slowest strip is done.
*/

/// What each worker leaves in its slot before the barrier.
type Slot = OnceLock<Option<PartialResult>>;

pub fn barrier_reduce(grid: &Grid, plan: &StripPlan, scan: &Scanner) -> Result<Aggregator, ReduceError> {
    let workers = plan.workers();
    let barrier = CountingBarrier::new(NonZeroUsize::new(workers).ok_or_else(|| {
        ReduceError::InvalidConfiguration("barrier needs at least one worker".into())
    })?);
    let slots: Vec<Slot> = (0..workers).map(|_| OnceLock::new()).collect();

    let results = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|id| {
                let barrier = &barrier;
                let slots = &slots;
                scope.spawn(move || {
                    let strip = plan.strip(id);
                    debug!(worker = id, first = strip.start, end = strip.end, "barrier worker started");

                    // a failed scan still has to arrive, or everyone else waits forever
                    let scanned = panic::catch_unwind(AssertUnwindSafe(|| scan(grid, strip)));
                    let failed = match scanned {
                        Ok(partial) => {
                            let _ = slots[id].set(partial);
                            false
                        }
                        Err(_) => true,
                    };

                    let release = barrier.wait();
                    debug!(worker = id, ?release, "passed barrier");

                    if failed {
                        return Err(ReduceError::WorkerPanicked { worker: id });
                    }
                    if id != 0 {
                        return Ok(None);
                    }
                    Ok(merge_slots(slots))
                })
            })
            .collect();

        join_workers(handles)
    })?;

    let mut merged = None;
    for outcome in results {
        if let Some(aggregator) = outcome? {
            merged = Some(aggregator);
        }
    }
    // worker 0 skips the merge only when some strip failed, and that
    // failure was already returned above
    merged.ok_or(ReduceError::WorkerPanicked { worker: 0 })
}

/// Folds every slot in worker order. `None` if any worker left its slot unset.
fn merge_slots(slots: &[Slot]) -> Option<Aggregator> {
    let mut aggregator = Aggregator::new();
    for slot in slots {
        if let Some(partial) = slot.get()? {
            aggregator.merge(*partial);
        }
    }
    Some(aggregator)
}
