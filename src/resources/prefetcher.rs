//! Resource prefetching.
//!
//! - `ResourceLoader`: the external fetch (network, disk, asset bundle)
//! - `ResourcePrefetcher`: what the delivery controller calls; never fails
//! - `CachedPrefetcher`: single-flight, placeholder-on-failure adapter
//!   turning any loader into a prefetcher
//! - `fetch_bounded`: concurrent fetch of many keys with a fan-out cap

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::OnceCell;
use tokio::task::JoinSet;
use tracing::{trace, warn};

use super::handle::{Resource, ResourceHandle};
use crate::error::PrefetchError;

/// Loads a resource from wherever it lives.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn load(&self, key: &str) -> Result<Resource, PrefetchError>;
}

/// Resolves resource keys to handles.
///
/// Implementations must be idempotent: calling `fetch` repeatedly for the
/// same key, including concurrently, performs the underlying load at most
/// once and yields the same handle. Failures resolve to
/// `ResourceHandle::Placeholder`.
#[async_trait]
pub trait ResourcePrefetcher: Send + Sync {
    async fn fetch(&self, key: &str) -> ResourceHandle;
}

/// Deduplicating prefetcher over a `ResourceLoader`.
///
/// Each key gets one `OnceCell`; concurrent callers for a key that is
/// already in flight wait on the same cell. Failed loads are cached as
/// placeholders, so a missing image is not re-requested on every scroll.
pub struct CachedPrefetcher<L> {
    loader: L,
    cells: Mutex<FxHashMap<String, Arc<OnceCell<ResourceHandle>>>>,
    loads: AtomicUsize,
}

impl<L: ResourceLoader> CachedPrefetcher<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            cells: Mutex::new(FxHashMap::default()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of underlying loader calls made so far.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of keys that have been requested (resolved or in flight).
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn cell_for(&self, key: &str) -> Arc<OnceCell<ResourceHandle>> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(key.to_owned()).or_default())
    }
}

#[async_trait]
impl<L: ResourceLoader> ResourcePrefetcher for CachedPrefetcher<L> {
    async fn fetch(&self, key: &str) -> ResourceHandle {
        let cell = self.cell_for(key);
        cell.get_or_init(|| async {
            self.loads.fetch_add(1, Ordering::Relaxed);
            match self.loader.load(key).await {
                Ok(resource) => ResourceHandle::Loaded(Arc::new(resource)),
                Err(err) => {
                    warn!(key, error = %err, "resource unavailable, using placeholder");
                    ResourceHandle::Placeholder
                }
            }
        })
        .await
        .clone()
    }
}

/// Fetch every key with at most `width` fetches in flight.
///
/// Handles are returned in key order. A fetch task that panics leaves a
/// placeholder in its slot.
pub async fn fetch_bounded(
    prefetcher: &Arc<dyn ResourcePrefetcher>,
    keys: Vec<String>,
    width: usize,
) -> Vec<ResourceHandle> {
    let mut handles = vec![ResourceHandle::Placeholder; keys.len()];
    let mut queued = keys.into_iter().enumerate();
    let mut in_flight = JoinSet::new();

    let spawn = |set: &mut JoinSet<(usize, ResourceHandle)>, idx: usize, key: String| {
        let prefetcher = Arc::clone(prefetcher);
        set.spawn(async move { (idx, prefetcher.fetch(&key).await) });
    };

    for (idx, key) in queued.by_ref().take(width.max(1)) {
        spawn(&mut in_flight, idx, key);
    }

    while let Some(joined) = in_flight.join_next().await {
        match joined {
            Ok((idx, handle)) => handles[idx] = handle,
            Err(err) => warn!(error = %err, "prefetch task failed, using placeholder"),
        }
        if let Some((idx, key)) = queued.next() {
            spawn(&mut in_flight, idx, key);
        }
    }

    trace!(count = handles.len(), "prefetch fan-out complete");
    handles
}
