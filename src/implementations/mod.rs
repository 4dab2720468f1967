pub mod barrier;
pub mod dynamic_bag;
pub mod global_lock;
pub mod rayon;
pub mod single;

use std::thread::ScopedJoinHandle;

use crate::error::ReduceError;

/// Joins every worker, in worker order, and reports the first that panicked.
///
/// All handles are joined even after a failure: leaving a panicked thread
/// unjoined would make the enclosing scope panic instead of returning.
pub(crate) fn join_workers<T>(handles: Vec<ScopedJoinHandle<'_, T>>) -> Result<Vec<T>, ReduceError> {
    let mut outputs = Vec::with_capacity(handles.len());
    let mut failed = None;
    for (worker, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(output) => outputs.push(output),
            Err(_) => {
                failed.get_or_insert(worker);
            }
        }
    }
    match failed {
        Some(worker) => Err(ReduceError::WorkerPanicked { worker }),
        None => Ok(outputs),
    }
}
