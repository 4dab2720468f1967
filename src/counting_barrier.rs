use std::num::NonZeroUsize;
use std::sync::{Condvar, Mutex};

use tracing::trace;

use crate::lock_util::{lock, wait};

/// How a thread left the barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarrierRelease {
    /// This thread completed the group and woke everyone else.
    LastArrival,
    /// This thread blocked until the last arrival released it.
    Released,
}

impl BarrierRelease {
    pub fn is_last_arrival(self) -> bool {
        self == BarrierRelease::LastArrival
    }
}

#[derive(Debug)]
struct BarrierState {
    arrived: usize,
    generation: u64,
}

/// Reusable counting barrier for a fixed number of parties.
///
/// Waiters sleep until the generation moves on rather than until the count
/// reaches some value, so a thread still waking from one cycle cannot be
/// confused by arrivals already counting towards the next.
#[derive(Debug)]
pub struct CountingBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl CountingBarrier {
    pub fn new(parties: NonZeroUsize) -> Self {
        CountingBarrier {
            parties: parties.get(),
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
            }),
            released: Condvar::new(),
        }
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Blocks until `parties` threads have called `wait` in the current cycle.
    pub fn wait(&self) -> BarrierRelease {
        let mut state = lock(&self.state);
        let generation = state.generation;
        state.arrived += 1;

        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            trace!(generation, parties = self.parties, "barrier released");
            return BarrierRelease::LastArrival;
        }

        while state.generation == generation {
            state = wait(&self.released, state);
        }
        BarrierRelease::Released
    }
}
