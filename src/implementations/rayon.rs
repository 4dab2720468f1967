use rayon::prelude::*;

use crate::aggregator::Aggregator;
use crate::error::ReduceError;
use crate::grid::Grid;
use crate::partition::RowRange;
use crate::result::GlobalResult;
use crate::worker::scan_rows;

// Each row becomes its own partial and rayon's reduce combines them in row
// order, so ties land on the same cell as the single-threaded scan.
pub fn rayon_reduce(grid: &Grid) -> Result<GlobalResult, ReduceError> {
    let merged = (0..grid.rows())
        .into_par_iter()
        .filter_map(|i| scan_rows(grid, RowRange::new(i, i + 1)))
        .reduce_with(|mut left, right| {
            left.merge(&right);
            left
        });

    let mut aggregator = Aggregator::new();
    if let Some(partial) = merged {
        aggregator.merge(partial);
    }
    aggregator.finish(grid)
}
