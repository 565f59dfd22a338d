use std::sync::Arc;

use bms_types::CollectionKind;

use crate::error::StoreResult;
use crate::memory::InMemoryItemStore;
use crate::traits::ItemStore;

/// The ordered collections managed by the back-office, one store each.
#[derive(Clone)]
pub struct Collections {
    sections: Arc<dyn ItemStore>,
    posts: Arc<dyn ItemStore>,
}

impl Collections {
    pub fn new(sections: Arc<dyn ItemStore>, posts: Arc<dyn ItemStore>) -> Self {
        Self { sections, posts }
    }

    /// Empty in-memory collections.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryItemStore::new()),
            Arc::new(InMemoryItemStore::new()),
        )
    }

    /// In-memory collections pre-filled with the demo catalog.
    pub fn demo() -> StoreResult<Self> {
        Ok(Self::new(
            Arc::new(InMemoryItemStore::with_items(
                CollectionKind::Sections.demo_items(),
            )?),
            Arc::new(InMemoryItemStore::with_items(
                CollectionKind::Posts.demo_items(),
            )?),
        ))
    }

    pub fn get(&self, kind: CollectionKind) -> &Arc<dyn ItemStore> {
        match kind {
            CollectionKind::Sections => &self.sections,
            CollectionKind::Posts => &self.posts,
        }
    }

    pub fn sections(&self) -> &Arc<dyn ItemStore> {
        &self.sections
    }

    pub fn posts(&self) -> &Arc<dyn ItemStore> {
        &self.posts
    }
}

impl std::fmt::Debug for Collections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collections")
            .field("sections", &self.sections.len().unwrap_or(0))
            .field("posts", &self.posts.len().unwrap_or(0))
            .finish()
    }
}
