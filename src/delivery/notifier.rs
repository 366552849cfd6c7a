//! View-side traits.
//!
//! - `ViewNotifier`: receives reset and append notifications
//! - `Deliverable`: what the controller needs from an item

use std::sync::Arc;

use crate::cards::CardRecord;
use crate::resources::ResourceHandle;

/// Receives delivered items.
///
/// Both methods are called with the controller's state lock held, which is
/// what keeps a stale batch from landing after a reset. Implementations
/// must not call back into the controller.
pub trait ViewNotifier<T>: Send + Sync {
    /// Replace everything displayed with `items`. An empty slice clears the view.
    fn on_reset(&self, items: &[T]);

    /// Append `items` after what is displayed. An empty slice is a no-op.
    fn on_append(&self, items: &[T]);
}

/// An item the controller can deliver.
pub trait Deliverable: Clone + Send + Sync + 'static {
    /// Key handed to the prefetcher.
    fn resource_key(&self) -> &str;

    /// Receive the prefetched handle before delivery.
    fn attach_resource(&self, handle: ResourceHandle);
}

impl Deliverable for Arc<CardRecord> {
    fn resource_key(&self) -> &str {
        &self.resource_key
    }

    fn attach_resource(&self, handle: ResourceHandle) {
        // Keep the first handle if the card was delivered before.
        let _ = CardRecord::attach_resource(self, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Category};

    #[test]
    fn test_card_record_is_deliverable() {
        let card = Arc::new(
            CardRecord::new(CardId::new(8), "Potion", Some(Category::Item)).with_resource_key("img/potion"),
        );

        assert_eq!(Deliverable::resource_key(&card), "img/potion");
        Deliverable::attach_resource(&card, ResourceHandle::Placeholder);
        assert_eq!(card.resource(), Some(&ResourceHandle::Placeholder));
    }
}
