/// Things that can go wrong when reducing a grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReduceError {
    /// Settings rejected before any worker thread is spawned
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A grid without cells has no minimum or maximum
    #[error("grid is empty ({rows}x{cols}), min/max are undefined")]
    EmptyGrid { rows: usize, cols: usize },

    /// A worker thread panicked, so its rows never reached the result
    #[error("worker {worker} panicked during reduction")]
    WorkerPanicked { worker: usize },
}
