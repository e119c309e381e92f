//! Synchronization utilities for robust mutex handling
//!
//! Converts poisoned `Mutex` and `Condvar` results into domain errors so that
//! callers propagate them with `?` instead of unwrapping.

use std::sync::{Condvar, LockResult, MutexGuard};

/// Handle poisoned mutex cases with consistent error handling
///
/// # Arguments
/// * `result` - The result from a mutex lock operation
/// * `error_constructor` - Function to create the appropriate error type
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use sensorbuf::core::sync::handle_mutex_poison;
/// use sensorbuf::queue::QueueError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(mutex.lock(), |message| QueueError::Poisoned { message }).unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(
            format!(
                "Internal synchronisation error (mutex poisoned). This indicates a panic occurred while holding a lock. PoisonError: {:?}",
                poison_err
            )
        )
    })
}

/// Block on `condvar` while `condition` holds, mapping poison to a domain error
///
/// Spurious wakeups are absorbed by `Condvar::wait_while`; the guard is
/// returned with the condition false.
pub fn wait_while_poison<'a, T, E>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    condition: impl FnMut(&mut T) -> bool,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    condvar.wait_while(guard, condition).map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (condition wait poisoned). PoisonError: {:?}",
            poison_err
        ))
    })
}
