//! Resource handles and prefetching.
//!
//! The delivery controller asks a `ResourcePrefetcher` for each item's
//! resource before handing the item to the view. The prefetcher owns the
//! only shared mutable state in the crate and must populate it race-free.

pub mod handle;
pub mod prefetcher;

pub use handle::{Resource, ResourceHandle};
pub use prefetcher::{fetch_bounded, CachedPrefetcher, ResourceLoader, ResourcePrefetcher};
