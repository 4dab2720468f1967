use crate::aggregator::Aggregator;
use crate::error::ReduceError;
use crate::grid::Grid;
use crate::partition::RowRange;
use crate::result::GlobalResult;
use crate::worker::scan_rows;

// one thread, whole grid, plain row-major scan: the reference answer
pub fn single_reduce(grid: &Grid) -> Result<GlobalResult, ReduceError> {
    let mut aggregator = Aggregator::new();
    if let Some(partial) = scan_rows(grid, RowRange::new(0, grid.rows())) {
        aggregator.merge(partial);
    }
    aggregator.finish(grid)
}
