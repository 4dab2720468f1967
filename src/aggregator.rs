use crate::error::ReduceError;
use crate::grid::Grid;
use crate::result::{GlobalResult, PartialResult};

/// Running merge of worker partials.
///
/// Not synchronized itself: each strategy decides who may touch it (a single
/// merging worker, or whoever holds the strategy's one lock).
#[derive(Debug, Default)]
pub struct Aggregator {
    merged: Option<PartialResult>,
    contributions: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Aggregator::default()
    }

    pub fn merge(&mut self, partial: PartialResult) {
        match &mut self.merged {
            Some(acc) => acc.merge(&partial),
            None => self.merged = Some(partial),
        }
        self.contributions += 1;
    }

    /// Number of partials merged so far.
    pub fn contributions(&self) -> usize {
        self.contributions
    }

    /// Hands out the whole-grid result. Nothing merged means the grid had no
    /// cells to reduce.
    pub fn finish(self, grid: &Grid) -> Result<GlobalResult, ReduceError> {
        self.merged
            .map(GlobalResult::from)
            .ok_or(ReduceError::EmptyGrid {
                rows: grid.rows(),
                cols: grid.cols(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Extremum;

    fn partial(sum: i64, min: Extremum, max: Extremum) -> PartialResult {
        PartialResult { sum, min, max }
    }

    #[test]
    fn finish_without_merges_is_empty_grid() {
        let err = Aggregator::new().finish(&Grid::zeros(0, 4)).unwrap_err();
        assert_eq!(err, ReduceError::EmptyGrid { rows: 0, cols: 4 });
    }

    #[test]
    fn merges_in_arrival_order() {
        let mut aggregator = Aggregator::new();
        aggregator.merge(partial(10, Extremum::new(1, 0, 0), Extremum::new(9, 0, 3)));
        aggregator.merge(partial(20, Extremum::new(1, 2, 2), Extremum::new(12, 3, 0)));
        aggregator.merge(partial(5, Extremum::new(0, 5, 1), Extremum::new(4, 5, 0)));
        assert_eq!(aggregator.contributions(), 3);

        let result = aggregator.finish(&Grid::zeros(6, 4)).unwrap();
        assert_eq!(result.sum, 35);
        assert_eq!(result.min, Extremum::new(0, 5, 1));
        assert_eq!(result.max, Extremum::new(12, 3, 0));
    }
}
