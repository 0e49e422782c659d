//! Adapters for the secretary's outbound ports.

pub mod memory;
pub mod summarizer;

pub use memory::InMemoryItemRepository;
pub use summarizer::{FallbackSummarizer, RuleBasedSummarizer};
