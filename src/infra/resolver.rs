//! Bounded worker pool for batch lookups.
//!
//! A fixed number of workers share one cursor over the input. Each worker
//! claims the next index with an atomic `fetch_add`, resolves it, and moves
//! on until the cursor runs past the end. Failed items are logged and left
//! out of the result; the batch as a whole never fails.

use std::{
    fmt::Display,
    future::Future,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use tokio::task::JoinSet;

/// Upper bound on concurrent lookups against the catalog.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Shared claim cursor over a fixed list.
#[derive(Debug, Default)]
pub(crate) struct WorkCursor {
    next: AtomicUsize,
}

impl WorkCursor {
    /// Next unclaimed index below `len`, or `None` once the list is exhausted.
    pub(crate) fn claim(&self, len: usize) -> Option<usize> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        (index < len).then_some(index)
    }
}

/// Number of workers worth starting for `len` items.
pub(crate) fn worker_count(concurrency: usize, len: usize) -> usize {
    concurrency.max(1).min(len)
}

/// Resolves every id with at most `concurrency` lookups in flight.
///
/// Results come back in completion order; callers sort as they need.
pub async fn resolve_all<I, T, E, F, Fut>(ids: Vec<I>, concurrency: usize, resolve: F) -> Vec<T>
where
    I: Copy + Display + Send + Sync + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    if ids.is_empty() {
        return Vec::new();
    }

    let ids: Arc<[I]> = ids.into();
    let cursor = Arc::new(WorkCursor::default());
    let resolve = Arc::new(resolve);
    let workers = worker_count(concurrency, ids.len());

    let mut pool = JoinSet::new();
    for _ in 0..workers {
        let ids = ids.clone();
        let cursor = cursor.clone();
        let resolve = resolve.clone();
        pool.spawn(async move {
            let mut resolved = Vec::new();
            while let Some(index) = cursor.claim(ids.len()) {
                let id = ids[index];
                match resolve(id).await {
                    Ok(value) => resolved.push(value),
                    Err(reason) => log::debug!("[resolver] dropped {id}: {reason}"),
                }
            }
            resolved
        });
    }

    let mut results = Vec::with_capacity(ids.len());
    while let Some(joined) = pool.join_next().await {
        match joined {
            Ok(mut resolved) => results.append(&mut resolved),
            Err(err) => log::warn!("[resolver] worker aborted: {err}"),
        }
    }

    log::info!(
        "[resolver] resolved {}/{} ids with {workers} workers",
        results.len(),
        ids.len()
    );
    results
}
