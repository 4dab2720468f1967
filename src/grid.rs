use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CELL_MODULUS;
use crate::error::ReduceError;

/// Row-major `rows x cols` matrix of integers. Read-only once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl Grid {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Wraps row-major `data`, which must hold exactly `rows * cols` cells.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<i32>) -> Result<Self, ReduceError> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            ReduceError::InvalidConfiguration(format!("grid shape {rows}x{cols} overflows"))
        })?;
        if data.len() != expected {
            return Err(ReduceError::InvalidConfiguration(format!(
                "grid shape {rows}x{cols} needs {expected} cells, got {}",
                data.len()
            )));
        }
        Ok(Grid { rows, cols, data })
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> i32,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Grid { rows, cols, data }
    }

    /// Fills the grid with values in `0..CELL_MODULUS` from a seeded generator,
    /// so the same seed always yields the same matrix.
    pub fn random(rows: usize, cols: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Grid::from_fn(rows, cols, |_, _| rng.gen_range(0..CELL_MODULUS))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn data(&self) -> &[i32] {
        &self.data
    }

    pub fn row(&self, i: usize) -> &[i32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<i32> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    // dump the matrix, one bracketed row per line
    pub fn print(&self) {
        for i in 0..self.rows {
            print!("[ ");
            for value in self.row(i) {
                print!(" {}", value);
            }
            println!(" ]");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Grid::from_vec(2, 3, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, ReduceError::InvalidConfiguration(_)));
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = Grid::from_fn(2, 3, |i, j| (i * 10 + j) as i32);
        assert_eq!(grid.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.row(1), &[10, 11, 12]);
        assert_eq!(grid.get(1, 2), Some(12));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn random_is_seeded_and_bounded() {
        let a = Grid::random(20, 30, 7);
        let b = Grid::random(20, 30, 7);
        assert_eq!(a, b);
        assert!(a.data().iter().all(|&v| (0..CELL_MODULUS).contains(&v)));
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(Grid::zeros(0, 5).is_empty());
        assert!(Grid::zeros(5, 0).is_empty());
        assert!(!Grid::zeros(1, 1).is_empty());
    }
}
