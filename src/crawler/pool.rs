//! Work-stealing worker pool for the recursive crawl
//!
//! Tasks running on the pool may spawn further tasks onto it, and
//! [`WorkerPool::scope`] only returns once every task spawned inside it,
//! transitively, has finished.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;

/// Handle through which running tasks submit more work
pub type TaskScope<'scope> = rayon::Scope<'scope>;

/// Bounded pool of worker threads with work stealing
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    parallelism: usize,
}

impl WorkerPool {
    /// Creates a pool of `min(requested, hardware_parallelism())` threads
    pub fn new(requested: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let parallelism = effective_parallelism(requested);
        let pool = ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .thread_name(|index| format!("crawl-worker-{}", index))
            .build()?;

        tracing::debug!("Worker pool started with {} threads", parallelism);

        Ok(Self { pool, parallelism })
    }

    /// Number of worker threads actually running
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Runs `op` on the pool and blocks until it and every task spawned
    /// through the scope have completed
    ///
    /// A panic in any task is re-raised here once the scope has drained.
    pub fn scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&TaskScope<'scope>) -> R + Send,
        R: Send,
    {
        self.pool.scope(op)
    }
}

/// Number of hardware threads reported by the OS (at least 1)
pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Clamps a requested thread count to `1..=hardware_parallelism()`
pub fn effective_parallelism(requested: usize) -> usize {
    requested.min(hardware_parallelism()).max(1)
}
