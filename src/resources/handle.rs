//! Resource handles.

use std::sync::Arc;

/// A loaded resource (typically card art).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Key the resource was loaded under.
    pub key: String,
    /// Raw bytes as returned by the loader.
    pub data: Vec<u8>,
}

impl Resource {
    pub fn new(key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            data: data.into(),
        }
    }
}

/// Result of resolving a resource key.
///
/// Loading never fails from the caller's point of view: a key that cannot
/// be loaded resolves to `Placeholder` and the view draws a stand-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceHandle {
    Loaded(Arc<Resource>),
    Placeholder,
}

impl ResourceHandle {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ResourceHandle::Placeholder)
    }

    /// The loaded resource, if any.
    #[must_use]
    pub fn resource(&self) -> Option<&Arc<Resource>> {
        match self {
            ResourceHandle::Loaded(resource) => Some(resource),
            ResourceHandle::Placeholder => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_accessors() {
        let loaded = ResourceHandle::Loaded(Arc::new(Resource::new("card/1", vec![1, 2, 3])));
        assert!(!loaded.is_placeholder());
        assert_eq!(loaded.resource().unwrap().data, vec![1, 2, 3]);

        assert!(ResourceHandle::Placeholder.is_placeholder());
        assert!(ResourceHandle::Placeholder.resource().is_none());
    }
}
