use crate::grid::Grid;
use crate::partition::RowRange;
use crate::result::PartialResult;

/// Scan function run by every worker. Strategies take it by reference so the
/// per-cell fold stays in one place.
pub type Scanner = dyn Fn(&Grid, RowRange) -> Option<PartialResult> + Sync;

/// Scans every cell of `range` once, row-major, and folds it into a partial.
///
/// Returns `None` when the range holds no cells (empty strip, clipped slice
/// past the grid, or a zero-column grid); such a region must never be merged.
pub fn scan_rows(grid: &Grid, range: RowRange) -> Option<PartialResult> {
    let first = range.start;
    let last = range.end.min(grid.rows());
    if first >= last || grid.cols() == 0 {
        return None;
    }

    let mut partial = PartialResult::starting_at(grid.row(first)[0], first, 0);
    for i in first..last {
        for (j, &val) in grid.row(i).iter().enumerate() {
            partial.observe(val, i, j);
        }
    }
    Some(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Extremum;

    #[test]
    fn scans_only_the_given_rows() {
        let grid = Grid::from_fn(4, 4, |i, j| (i * 4 + j) as i32);
        let partial = scan_rows(&grid, RowRange::new(1, 3)).unwrap();
        assert_eq!(partial.sum, (4..12).sum::<i64>());
        assert_eq!(partial.min, Extremum::new(4, 1, 0));
        assert_eq!(partial.max, Extremum::new(11, 2, 3));
    }

    #[test]
    fn first_cell_seeds_both_extremes() {
        let grid = Grid::from_vec(2, 2, vec![7, 7, 7, 7]).unwrap();
        let partial = scan_rows(&grid, RowRange::new(0, 2)).unwrap();
        assert_eq!(partial.sum, 28);
        assert_eq!(partial.min, Extremum::new(7, 0, 0));
        assert_eq!(partial.max, Extremum::new(7, 0, 0));
    }

    #[test]
    fn decreasing_then_increasing_values() {
        let grid = Grid::from_vec(1, 5, vec![5, 3, 3, 8, 8]).unwrap();
        let partial = scan_rows(&grid, RowRange::new(0, 1)).unwrap();
        assert_eq!(partial.min, Extremum::new(3, 0, 1));
        assert_eq!(partial.max, Extremum::new(8, 0, 3));
    }

    #[test]
    fn empty_regions_yield_nothing() {
        let grid = Grid::from_fn(3, 3, |_, _| 1);
        assert_eq!(scan_rows(&grid, RowRange::new(2, 2)), None);
        assert_eq!(scan_rows(&grid, RowRange::new(3, 13)), None);
        assert_eq!(scan_rows(&Grid::zeros(3, 0), RowRange::new(0, 3)), None);
    }

    #[test]
    fn slice_past_the_grid_is_clipped() {
        let grid = Grid::from_fn(3, 2, |i, _| i as i32);
        let partial = scan_rows(&grid, RowRange::new(2, 12)).unwrap();
        assert_eq!(partial.sum, 4);
    }
}
