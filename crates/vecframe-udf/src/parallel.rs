#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::ThreadPool;
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use std::sync::OnceLock;
use vecframe_storage::Chunk;

/// Crate-local Rayon pool for partition fills.
///
/// Global pool initialization can fail under resource pressure, and Rayon then
/// panics on first use. A pool we build ourselves can fail gracefully: if it
/// can't be created, fills run on the calling thread.
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
static RAYON_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn desired_rayon_threads() -> usize {
    let from_env = std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0);
    from_env.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn build_rayon_pool() -> Option<ThreadPool> {
    let requested = desired_rayon_threads().max(1);
    let try_build = |n| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .thread_name(|i| format!("vecframe-fill-{i}"))
            .build()
    };

    match try_build(requested) {
        Ok(pool) => Some(pool),
        Err(err) if requested > 1 => {
            log::warn!("failed to build a {requested}-thread fill pool ({err}); retrying with 1");
            try_build(1).ok()
        }
        Err(err) => {
            log::warn!("failed to build a fill pool ({err}); filling on the caller's thread");
            None
        }
    }
}

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn rayon_pool() -> Option<&'static ThreadPool> {
    RAYON_POOL.get_or_init(build_rayon_pool).as_ref()
}

/// Apply `f` to every chunk, concurrently when a worker pool is available.
/// Results are returned in chunk order.
pub(crate) fn map_chunks<T, F>(chunks: &[Chunk], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Chunk) -> T + Sync,
{
    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    if let Some(pool) = rayon_pool() {
        use rayon::prelude::*;
        return pool.install(|| chunks.par_iter().map(&f).collect());
    }

    chunks.iter().map(f).collect()
}
