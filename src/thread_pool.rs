//! Shared thread pool for batch model evaluation.
//!
//! Design rows are independent, so closure-backed models evaluate them in
//! parallel. Results are collected in row order, which keeps the output
//! design aligned with the input design.

#[cfg(feature = "parallel")]
use rayon::ThreadPool;

#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
static THREAD_POOL: OnceLock<ThreadPool> = OnceLock::new();

/// Get or initialize the evaluation thread pool.
///
/// One worker per logical CPU, named `morris-eval-<i>`.
#[cfg(feature = "parallel")]
pub fn get_thread_pool() -> &'static ThreadPool {
    THREAD_POOL.get_or_init(|| {
        rayon::ThreadPoolBuilder::new()
            .thread_name(|i| format!("morris-eval-{i}"))
            .build()
            .expect("Failed to build evaluation thread pool")
    })
}

/// Run `op` inside the evaluation thread pool.
#[cfg(feature = "parallel")]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    get_thread_pool().install(op)
}

/// Map `f` over `0..n`, collecting results in index order.
#[cfg(feature = "parallel")]
pub fn map_indexed<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    use rayon::prelude::*;
    install(|| (0..n).into_par_iter().map(f).collect())
}

/// Map `f` over `0..n`, collecting results in index order.
#[cfg(not(feature = "parallel"))]
pub fn map_indexed<T, F>(n: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n).map(f).collect()
}
