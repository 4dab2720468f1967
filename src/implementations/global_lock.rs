use std::sync::Mutex;
use std::thread;

use tracing::debug;

use crate::aggregator::Aggregator;
use crate::error::ReduceError;
use crate::grid::Grid;
use crate::implementations::join_workers;
use crate::lock_util::{into_inner, lock};
use crate::partition::StripPlan;
use crate::worker::Scanner;

/*
  Static strips + one global Mutex around the accumulator

  Each worker scans its strip without holding anything, then takes the lock
  just long enough to merge its own partial. The merges commute, so no
  barrier is needed; the spawning thread joins everyone before reading.
*/

pub fn global_lock_reduce(grid: &Grid, plan: &StripPlan, scan: &Scanner) -> Result<Aggregator, ReduceError> {
    let shared = Mutex::new(Aggregator::new());

    thread::scope(|scope| {
        let handles: Vec<_> = (0..plan.workers())
            .map(|id| {
                let shared = &shared;
                scope.spawn(move || {
                    let strip = plan.strip(id);
                    debug!(worker = id, first = strip.start, end = strip.end, "lock worker started");

                    // scan outside the critical section
                    if let Some(partial) = scan(grid, strip) {
                        lock(shared).merge(partial);
                    }
                })
            })
            .collect();

        join_workers(handles)
    })?;

    Ok(into_inner(shared))
}
