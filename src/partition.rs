use std::num::NonZeroUsize;
use std::ops::Range;

/// Half-open range of grid rows `[start, end)`, always spanning every column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        RowRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Static strips: every worker owns `rows / workers` contiguous rows and the
/// last worker also takes the remainder.
///
/// With more workers than rows the strip size is zero, so every worker but
/// the last gets an empty strip and the last one scans the whole grid.
#[derive(Clone, Copy, Debug)]
pub struct StripPlan {
    rows: usize,
    workers: NonZeroUsize,
    strip_size: usize,
}

impl StripPlan {
    pub fn new(rows: usize, workers: NonZeroUsize) -> Self {
        StripPlan {
            rows,
            workers,
            strip_size: rows / workers.get(),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    pub fn strip_size(&self) -> usize {
        self.strip_size
    }

    pub fn strip(&self, worker: usize) -> RowRange {
        debug_assert!(worker < self.workers.get(), "worker {worker} out of range");
        let first = worker * self.strip_size;
        let last = if worker == self.workers.get() - 1 {
            self.rows
        } else {
            first + self.strip_size
        };
        RowRange::new(first, last)
    }

    pub fn strips(&self) -> impl Iterator<Item = RowRange> + '_ {
        (0..self.workers.get()).map(move |worker| self.strip(worker))
    }
}

/// Dynamic slices handed out by the bag of tasks.
#[derive(Clone, Copy, Debug)]
pub struct SlicePlan {
    rows: usize,
    slice_size: NonZeroUsize,
}

impl SlicePlan {
    pub fn new(rows: usize, slice_size: NonZeroUsize) -> Self {
        SlicePlan { rows, slice_size }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn slice_size(&self) -> usize {
        self.slice_size.get()
    }

    pub fn total_slices(&self) -> usize {
        self.rows.div_ceil(self.slice_size.get())
    }
}

/// Shared position of the next unclaimed row. Only moves forward.
#[derive(Debug, Default)]
pub struct Cursor {
    next_row: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Cursor::default()
    }

    pub fn next_row(&self) -> usize {
        self.next_row
    }

    /// Reads and advances the cursor by one slice. Returns `None` once the
    /// cursor has passed the last row; the final slice is clipped to the grid.
    pub fn claim(&mut self, plan: &SlicePlan) -> Option<RowRange> {
        let start = self.next_row;
        if start >= plan.rows {
            return None;
        }
        self.next_row = start.saturating_add(plan.slice_size.get());
        Some(RowRange::new(start, self.next_row.min(plan.rows)))
    }
}
