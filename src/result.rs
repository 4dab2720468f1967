use std::fmt;

/// An extreme cell value together with where it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extremum {
    pub value: i32,
    pub row: usize,
    pub col: usize,
}

impl Extremum {
    pub fn new(value: i32, row: usize, col: usize) -> Self {
        Extremum { value, row, col }
    }
}

/// Sum, minimum and maximum of one scanned region.
///
/// Only ever built from a non-empty region, so `min.value <= max.value` and
/// both positions lie inside the region that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartialResult {
    pub sum: i64,
    pub min: Extremum,
    pub max: Extremum,
}

impl PartialResult {
    /// Seeds min and max with the first cell of a scan. The sum starts at
    /// zero; the seeding cell is added when it is observed like any other.
    pub fn starting_at(value: i32, row: usize, col: usize) -> Self {
        let first = Extremum::new(value, row, col);
        PartialResult {
            sum: 0,
            min: first,
            max: first,
        }
    }

    /// Folds one scanned cell in. Only a strictly smaller or strictly larger
    /// value moves a position, so the first cell seen with an extreme value wins.
    pub fn observe(&mut self, value: i32, row: usize, col: usize) {
        self.sum += i64::from(value);
        // min and max start equal, so at most one branch can ever apply
        if value < self.min.value {
            self.min = Extremum::new(value, row, col);
        } else if value > self.max.value {
            self.max = Extremum::new(value, row, col);
        }
    }

    /// Combines another region's partial into this one. On equal extremes
    /// the receiver keeps its position.
    pub fn merge(&mut self, other: &PartialResult) {
        self.sum += other.sum;
        if other.min.value < self.min.value {
            self.min = other.min;
        }
        if other.max.value > self.max.value {
            self.max = other.max;
        }
    }
}

/// Whole-grid reduction outcome handed back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalResult {
    pub sum: i64,
    pub min: Extremum,
    pub max: Extremum,
}

impl From<PartialResult> for GlobalResult {
    fn from(partial: PartialResult) -> Self {
        GlobalResult {
            sum: partial.sum,
            min: partial.min,
            max: partial.max,
        }
    }
}

impl fmt::Display for GlobalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Maximum element value is {} at row/col position {}/{}",
            self.max.value, self.max.row, self.max.col
        )?;
        writeln!(
            f,
            "Minimum element value is {} at row/col position {}/{}",
            self.min.value, self.min.row, self.min.col
        )?;
        write!(f, "The total is {}", self.sum)
    }
}
