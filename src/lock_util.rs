//! Lock acquisition that survives poisoning.
//!
//! A worker never holds a lock while scanning, so a poisoned lock can only
//! come from a panic outside any critical section update. The panicking
//! worker is reported through its join handle; the data behind the lock is
//! still whole, so we take the guard back instead of failing a second time.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use tracing::warn;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| {
        warn!("recovering from poisoned lock");
        poison.into_inner()
    })
}

pub(crate) fn wait<'a, T>(condvar: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn into_inner<T>(mutex: Mutex<T>) -> T {
    mutex.into_inner().unwrap_or_else(PoisonError::into_inner)
}
