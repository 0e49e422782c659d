//! # Outbound Ports (Driven Ports / SPI)
//!
//! Storage and summary generation, injected into [`crate::Secretary`].

use crate::domain::{Item, ItemId, ItemKind, NewItem, SummarizeError};
use async_trait::async_trait;

/// Item storage.
///
/// Lookups by an unknown id return `None`; the store never fails otherwise.
pub trait ItemRepository: Send + Sync {
    /// Store a new item and return it with its assigned id.
    fn create(&self, item: NewItem) -> Item;

    fn get(&self, id: ItemId) -> Option<Item>;

    /// Items not yet marked done, in id order.
    fn open_todos(&self) -> Vec<Item>;

    fn mark_done(&self, id: ItemId) -> Option<Item>;

    fn update_due(&self, id: ItemId, due: String) -> Option<Item>;

    /// Everything, for the debug view.
    fn all(&self) -> Vec<Item>;
}

/// Input to a summary provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryContext<'a> {
    pub content: &'a str,
    pub kind: ItemKind,
}

/// One to three lines describing a captured message.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    async fn summarize(&self, context: &SummaryContext<'_>) -> Result<String, SummarizeError>;
}
