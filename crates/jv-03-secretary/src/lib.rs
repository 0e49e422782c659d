//! # Secretary (JV-03)
//!
//! The collaborator behind the callback gateway. It receives plaintext
//! messages and returns plaintext replies; it never sees key material.
//!
//! ```text
//! content ──▶ Command::parse ──▶ list / done / postpone ──▶ reply text
//!                  │ no match
//!                  ▼
//!            detect_kind ──▶ ItemRepository::create ──▶ Summarizer ──▶ reply text
//! ```
//!
//! Storage and summarization are injected through [`ports`]; the crate ships
//! an in-memory repository and a fallback summarizer chain ending in a
//! rule-based template.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FallbackSummarizer, InMemoryItemRepository, RuleBasedSummarizer};
pub use domain::{Command, Item, ItemId, ItemKind, NewItem, SummarizeError};
pub use ports::{ItemRepository, Summarizer, SummaryContext};
pub use service::Secretary;
