//! In-memory item repository. Contents are lost on restart.

use crate::domain::{Item, ItemId, NewItem};
use crate::ports::ItemRepository;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

struct Inner {
    next_id: ItemId,
    items: BTreeMap<ItemId, Item>,
}

/// In-memory implementation of [`ItemRepository`]
pub struct InMemoryItemRepository {
    inner: RwLock<Inner>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                items: BTreeMap::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn modify(&self, id: ItemId, f: impl FnOnce(&mut Item)) -> Option<Item> {
        let mut inner = self.inner.write();
        let item = inner.items.get_mut(&id)?;
        f(item);
        Some(item.clone())
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository for InMemoryItemRepository {
    fn create(&self, item: NewItem) -> Item {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let stored = Item {
            id,
            content: item.content,
            kind: item.kind,
            title: item.title,
            due: None,
            done: false,
            created_at: Utc::now(),
        };
        inner.items.insert(id, stored.clone());
        stored
    }

    fn get(&self, id: ItemId) -> Option<Item> {
        self.inner.read().items.get(&id).cloned()
    }

    fn open_todos(&self) -> Vec<Item> {
        self.inner
            .read()
            .items
            .values()
            .filter(|item| item.is_open())
            .cloned()
            .collect()
    }

    fn mark_done(&self, id: ItemId) -> Option<Item> {
        self.modify(id, |item| item.done = true)
    }

    fn update_due(&self, id: ItemId, due: String) -> Option<Item> {
        self.modify(id, |item| item.due = Some(due))
    }

    fn all(&self) -> Vec<Item> {
        self.inner.read().items.values().cloned().collect()
    }
}
