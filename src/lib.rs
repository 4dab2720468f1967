//! Parallel sum / min / max reduction over a 2-D integer grid.
//!
//! The same reduction is implemented with three synchronization strategies
//! (see [`Strategy`]) so they can be compared against each other and against
//! the single-threaded and rayon baselines in [`implementations`].

pub mod aggregator;
pub mod config;
pub mod counting_barrier;
pub mod engine;
pub mod error;
pub mod grid;
pub mod implementations;
pub mod partition;
pub mod result;
pub mod worker;

mod lock_util;

pub use engine::{reduce, Reducer, Strategy};
pub use error::ReduceError;
pub use grid::Grid;
pub use result::{Extremum, GlobalResult, PartialResult};
