/// Parallel processing utilities
use crate::PruneError;

/// Sentinel meaning "use every available hardware thread".
pub const ALL_THREADS: i64 = -1;

/// Turn a requested thread count into a concrete one.
///
/// `-1` resolves to the number of logical CPUs; zero and other negative
/// values are rejected.
pub fn resolve_thread_count(requested: i64) -> Result<usize, PruneError> {
    match requested {
        ALL_THREADS => Ok(num_cpus::get().max(1)),
        n if n > 0 => usize::try_from(n)
            .map_err(|_| PruneError::ParameterRange(format!("thread count {} is too large", n))),
        n => Err(PruneError::ParameterRange(format!(
            "thread count must be positive or -1 (all available), got {}",
            n
        ))),
    }
}

/// Build a dedicated worker pool; the global rayon pool is left untouched.
pub fn build_thread_pool(threads: usize) -> Result<rayon::ThreadPool, PruneError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("seqprune-worker-{}", i))
        .build()
        .map_err(|e| PruneError::WorkerFailure(format!("Failed to create thread pool: {}", e)))
}
