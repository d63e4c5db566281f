use std::sync::{Mutex, MutexGuard};
use tokio::runtime::Runtime;

/// Creates a lightweight single-threaded Tokio runtime
///
/// The CLI issues at most two sequential provider calls per command, so a
/// current_thread scheduler is enough and avoids spawning one worker per core.
///
/// Returns `Ok(Runtime)` if successful, or `Err(String)` with error message
pub fn create_runtime() -> Result<Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create runtime: {}", e))
}

/// Safely locks a mutex with poisoning recovery
///
/// If the mutex is poisoned (previous holder panicked), the inner value is
/// recovered. The guarded SQLite connection stays usable after a panic in an
/// unrelated query, so recovering is safe here.
pub fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("[{}] Mutex poisoned, recovering from panic", context);
            poisoned.into_inner()
        }
    }
}
