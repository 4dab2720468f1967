use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use tracing::info;

use crate::config::DEFAULT_SLICE_SIZE;
use crate::error::ReduceError;
use crate::grid::Grid;
use crate::implementations::barrier::barrier_reduce;
use crate::implementations::dynamic_bag::dynamic_bag_reduce;
use crate::implementations::global_lock::global_lock_reduce;
use crate::partition::{SlicePlan, StripPlan};
use crate::result::GlobalResult;
use crate::worker::{scan_rows, Scanner};

/// How worker partials are brought together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Static strips, rendezvous at a counting barrier, worker 0 merges alone.
    Barrier,
    /// Static strips, each worker merges under one shared lock.
    GlobalLock,
    /// Workers claim fixed-size row slices from a shared cursor until none remain.
    DynamicBag,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Barrier, Strategy::GlobalLock, Strategy::DynamicBag];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Barrier => "barrier",
            Strategy::GlobalLock => "global-lock",
            Strategy::DynamicBag => "dynamic-bag",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReduceError::InvalidConfiguration(format!("unknown strategy `{s}`")))
    }
}

/// A validated reduction setup: worker count, strategy and bag slice size.
#[derive(Clone, Copy, Debug)]
pub struct Reducer {
    workers: NonZeroUsize,
    strategy: Strategy,
    slice_size: NonZeroUsize,
}

impl Reducer {
    pub fn new(workers: usize, strategy: Strategy) -> Result<Self, ReduceError> {
        let workers = NonZeroUsize::new(workers).ok_or_else(|| {
            ReduceError::InvalidConfiguration("number of workers must be at least 1".into())
        })?;
        Ok(Reducer {
            workers,
            strategy,
            slice_size: NonZeroUsize::new(DEFAULT_SLICE_SIZE).unwrap_or(NonZeroUsize::MIN),
        })
    }

    /// Rows claimed per bag-of-tasks step. Only the dynamic bag uses it.
    pub fn with_slice_size(mut self, slice_size: usize) -> Result<Self, ReduceError> {
        self.slice_size = NonZeroUsize::new(slice_size).ok_or_else(|| {
            ReduceError::InvalidConfiguration("slice size must be at least 1".into())
        })?;
        Ok(self)
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn slice_size(&self) -> usize {
        self.slice_size.get()
    }

    pub fn reduce(&self, grid: &Grid) -> Result<GlobalResult, ReduceError> {
        self.reduce_with(grid, &scan_rows)
    }

    pub(crate) fn reduce_with(&self, grid: &Grid, scan: &Scanner) -> Result<GlobalResult, ReduceError> {
        if grid.is_empty() {
            return Err(ReduceError::EmptyGrid {
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        info!(
            strategy = %self.strategy,
            workers = self.workers.get(),
            rows = grid.rows(),
            cols = grid.cols(),
            "starting reduction"
        );

        let aggregator = match self.strategy {
            Strategy::Barrier => {
                let plan = StripPlan::new(grid.rows(), self.workers);
                barrier_reduce(grid, &plan, scan)?
            }
            Strategy::GlobalLock => {
                let plan = StripPlan::new(grid.rows(), self.workers);
                global_lock_reduce(grid, &plan, scan)?
            }
            Strategy::DynamicBag => {
                let plan = SlicePlan::new(grid.rows(), self.slice_size);
                dynamic_bag_reduce(grid, self.workers, &plan, scan)?
            }
        };
        info!(strategy = %self.strategy, merged = aggregator.contributions(), "reduction finished");
        aggregator.finish(grid)
    }
}

/// Reduces `grid` with `workers` threads under `strategy`.
pub fn reduce(grid: &Grid, workers: usize, strategy: Strategy) -> Result<GlobalResult, ReduceError> {
    Reducer::new(workers, strategy)?.reduce(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::RowRange;

    #[test]
    fn zero_workers_is_rejected() {
        let err = Reducer::new(0, Strategy::Barrier).unwrap_err();
        assert!(matches!(err, ReduceError::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_slice_size_is_rejected() {
        let err = Reducer::new(2, Strategy::DynamicBag)
            .unwrap()
            .with_slice_size(0)
            .unwrap_err();
        assert!(matches!(err, ReduceError::InvalidConfiguration(_)));
    }

    #[test]
    fn invalid_configuration_wins_over_empty_grid() {
        let err = reduce(&Grid::zeros(0, 0), 0, Strategy::GlobalLock).unwrap_err();
        assert!(matches!(err, ReduceError::InvalidConfiguration(_)));
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
        assert!("bogus".parse::<Strategy>().is_err());
    }

    #[test]
    fn worker_failure_aborts_every_strategy() {
        let grid = Grid::from_fn(30, 4, |i, j| (i + j) as i32);
        let faulty = |grid: &Grid, range: RowRange| {
            if range.rows().contains(&17) {
                panic!("injected scan failure");
            }
            scan_rows(grid, range)
        };
        for strategy in Strategy::ALL {
            let reducer = Reducer::new(3, strategy).unwrap();
            let err = reducer.reduce_with(&grid, &faulty).unwrap_err();
            assert!(
                matches!(err, ReduceError::WorkerPanicked { .. }),
                "{strategy}: {err:?}"
            );
        }
    }
}
